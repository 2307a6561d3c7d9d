//! # tasklist-core
//!
//! Core types, traits, and abstractions for the tasklist service.
//!
//! This crate provides the domain model (tasks and their validation
//! rules), the error type shared across the workspace, and the trait
//! seams the storage layer and rate limiter implement.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{CreateTaskRequest, DeleteTaskResponse, Task, TaskFilter, UpdateTaskRequest};
pub use traits::{CounterStore, TaskRepository, WindowCount};
