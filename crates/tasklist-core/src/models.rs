//! Domain models for the tasklist service.
//!
//! A [`Task`] always belongs to exactly one user; the owning `user_id` is an
//! opaque string supplied by the caller's identity and never interpreted
//! here. Request types validate field bounds before anything touches
//! storage.

use serde::{Deserialize, Serialize};

use crate::defaults::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
use crate::error::{Error, Result};

/// A single to-do item owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// System-assigned identifier, unique and monotonically increasing.
    pub id: i64,
    /// Opaque owner identity.
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_done: bool,
}

/// Payload for creating a task. `is_done` always starts false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
}

impl CreateTaskRequest {
    /// Check field bounds: title required and non-empty, both fields capped.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

/// Partial update for a task. Absent fields (including JSON `null`) are
/// left untouched; supplying no fields at all is rejected as
/// [`Error::EmptyUpdate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_done: Option<bool>,
}

impl UpdateTaskRequest {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_done.is_none()
    }

    /// Check field bounds on whatever subset is supplied; an empty subset
    /// is a caller error distinct from not-found.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

/// Optional list filters. Both filters AND-combine with the mandatory
/// ownership predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Keep only tasks with this completion state.
    pub is_done: Option<bool>,
    /// Keep only tasks whose title or description contains this substring.
    pub search: Option<String>,
}

/// Confirmation body returned by task deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
    pub task_id: i64,
}

impl DeleteTaskResponse {
    pub fn new(task_id: i64) -> Self {
        Self {
            message: format!("Task {} deleted successfully.", task_id),
            task_id,
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("Title cannot be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Title cannot exceed {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Description cannot exceed {} characters",
            DESCRIPTION_MAX_CHARS
        )));
    }
    Ok(())
}
