// Domain layer module exports
// Following Hexagonal Architecture
// Domain depends only on the repository port, never on a concrete store

pub mod repositories;
pub mod user;
