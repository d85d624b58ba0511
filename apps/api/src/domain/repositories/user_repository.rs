use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserPatch};

/// Failure reported by a storage backend
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for the User entity
///
/// Implementations own id generation. Lookups report absence as `Ok(None)`
/// and mutations report how many rows they touched, leaving existence
/// policy to the caller.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its generated id
    async fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    /// Every stored user, in storage order
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;

    /// Write the present fields of `patch`, returning the affected row count
    async fn update(&self, id: i32, patch: &UserPatch) -> RepositoryResult<u64>;

    /// Delete a user by ID, returning the affected row count
    async fn delete(&self, id: i32) -> RepositoryResult<u64>;
}
