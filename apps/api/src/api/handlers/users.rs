use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::user::{DeleteOutcome, NewUser, User, UserPatch};

/// Create a new user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List every user
///
/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.find_all().await?))
}

/// Get a user by ID
///
/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.find_one(id).await?))
}

/// Change some fields of a user
///
/// PATCH /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UserPatch>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update(id, req).await?))
}

/// Delete a user
///
/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    Ok(Json(state.users.remove(id).await?))
}
