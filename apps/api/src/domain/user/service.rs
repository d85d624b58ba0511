use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{DeleteOutcome, NewUser, User, UserPatch};

/// Errors surfaced by [`UserService`]
///
/// Storage failures are collapsed into `Persistence` with a fixed message;
/// the backend detail never leaves this module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("User with id {id} not found")]
    NotFound { id: i32 },

    #[error("{message}")]
    Persistence { message: &'static str },
}

impl UserError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn persistence(message: &'static str) -> Self {
        Self::Persistence { message }
    }
}

fn storage_failure(message: &'static str, error: RepositoryError) -> UserError {
    debug!(%error, "{}", message);
    UserError::persistence(message)
}

/// Data access for users: existence checks and error classification
/// on top of a [`UserRepository`]
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "users.service.create", skip_all)]
    pub async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let user = self
            .repo
            .insert(new_user)
            .await
            .map_err(|e| storage_failure("Failed to create user", e))?;

        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    #[instrument(name = "users.service.find_all", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, UserError> {
        self.repo
            .find_all()
            .await
            .map_err(|e| storage_failure("Failed to retrieve users", e))
    }

    #[instrument(name = "users.service.find_one", skip(self))]
    pub async fn find_one(&self, id: i32) -> Result<User, UserError> {
        self.existing(id).await
    }

    /// Applies `patch` and returns the re-read record
    ///
    /// Lookup, write and re-read are separate storage calls. A concurrent
    /// delete between them surfaces as `NotFound`.
    #[instrument(name = "users.service.update", skip(self, patch))]
    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<User, UserError> {
        let current = self.existing(id).await?;

        if patch.is_empty() {
            debug!("empty patch, nothing to write");
            return Ok(current);
        }

        self.repo
            .update(id, &patch)
            .await
            .map_err(|e| storage_failure("Failed to update user", e))?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure("Failed to update user", e))?
            .ok_or_else(|| UserError::not_found(id))
    }

    #[instrument(name = "users.service.remove", skip(self))]
    pub async fn remove(&self, id: i32) -> Result<DeleteOutcome, UserError> {
        self.existing(id).await?;

        let affected = self
            .repo
            .delete(id)
            .await
            .map_err(|e| storage_failure("Failed to delete user", e))?;

        debug!(affected, "user deleted");
        Ok(DeleteOutcome { affected })
    }

    async fn existing(&self, id: i32) -> Result<User, UserError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure("Failed to retrieve user", e))?
            .ok_or_else(|| UserError::not_found(id))
    }
}
