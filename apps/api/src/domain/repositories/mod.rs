// Repository ports (interfaces)
// Implemented by adapters in the infrastructure layer

pub mod user_repository;

pub use user_repository::{RepositoryError, UserRepository};
