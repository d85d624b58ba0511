//! Users API Library
//!
//! CRUD over a single `users` table: domain types and the data-access
//! service, storage adapters, and the HTTP layer that exposes them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
