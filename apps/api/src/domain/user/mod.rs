// User domain module
// Contains the user entity, its input shapes, and the data-access service

pub mod model;
pub mod service;

// Re-export main types for convenience
pub use model::{DeleteOutcome, NewUser, User, UserPatch};
pub use service::{UserError, UserService};
