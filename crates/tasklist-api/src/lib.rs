//! # tasklist-api
//!
//! HTTP API server for the tasklist service.
//!
//! This crate wires the storage layer into an axum application: CRUD
//! handlers for the per-user `/tasks` surface, request identity
//! resolution, the fixed-window rate limiter guarding task creation,
//! and the error mapping onto HTTP status codes.

pub mod error;
pub mod handlers;
pub mod identity;
pub mod routes;
pub mod services;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
