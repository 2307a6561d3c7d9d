//! Repository and counter-store traits.
//!
//! These are the seams between the HTTP layer, storage, and the rate
//! limiter. Every repository operation takes the caller's `user_id`;
//! there is deliberately no way to address a task without one.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateTaskRequest, Task, TaskFilter, UpdateTaskRequest};

/// Persistent store for tasks, scoped to the owning user on every call.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Validate and insert a new task for `user_id`. The store assigns
    /// the id; `is_done` starts false.
    async fn create(&self, user_id: &str, req: CreateTaskRequest) -> Result<Task>;

    /// Fetch a task only if both `id` and `user_id` match. `None` never
    /// reveals whether the id exists under another user.
    async fn get(&self, id: i64, user_id: &str) -> Result<Option<Task>>;

    /// All of the user's tasks matching `filter`, newest first (id
    /// descending).
    async fn list(&self, user_id: &str, filter: TaskFilter) -> Result<Vec<Task>>;

    /// Apply the supplied fields to an owned task. Returns the updated
    /// task, or `None` when no row matches `(id, user_id)`.
    async fn update(
        &self,
        id: i64,
        user_id: &str,
        req: UpdateTaskRequest,
    ) -> Result<Option<Task>>;

    /// Delete an owned task; returns whether a row was removed.
    async fn delete(&self, id: i64, user_id: &str) -> Result<bool>;
}

/// Post-increment state of one fixed-window counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Increments recorded in the current window, including this one.
    pub count: u64,
    /// Time until the window expires and the count resets.
    pub ttl: Duration,
}

/// Shared expiring counter backing the fixed-window rate limiter.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment the counter for `key`. The first increment
    /// of a window sets the key to expire after `window`; later
    /// increments must not extend it.
    async fn incr_with_expiry(&self, key: &str, window: Duration) -> Result<WindowCount>;
}
