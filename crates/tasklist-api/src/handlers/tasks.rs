//! Task CRUD HTTP handlers.
//!
//! Every handler resolves the caller through [`CurrentUser`] and passes
//! the resulting `user_id` to the repository; there is no route that
//! reaches a task without it. Not-found and not-yours produce the same
//! 404, so task ids leak nothing across users.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::identity::CurrentUser;
use crate::{ApiError, AppState};
use tasklist_core::{
    CreateTaskRequest, DeleteTaskResponse, Task, TaskFilter, TaskRepository, UpdateTaskRequest,
};

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Filter by completion state.
    pub is_done: Option<bool>,
    /// Substring match against title or description.
    pub search: Option<String>,
}

fn task_not_found(id: i64, user_id: &str) -> ApiError {
    ApiError::NotFound(format!("Task with ID {} not found for user {}", id, user_id))
}

/// Create a new task for the current user.
///
/// # Request Body
/// - `title`: Required, 1-255 characters after trimming
/// - `description`: Optional, up to 1000 characters
///
/// # Returns
/// - 201 Created with the new task (`is_done` starts false)
/// - 422 Unprocessable Entity if a field is out of bounds
/// - 429 Too Many Requests when the creation window is exhausted
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    state.rate_limiter.check(&user.user_id).await?;
    let task = state.db.tasks.create(&user.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// List the current user's tasks, newest first.
///
/// # Query Parameters
/// - `is_done`: Filter by completion state (optional)
/// - `search`: Substring match against title or description (optional)
///
/// # Returns
/// - 200 OK with an array of tasks (empty if none match)
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let filter = TaskFilter {
        is_done: query.is_done,
        search: query.search,
    };
    let tasks = state.db.tasks.list(&user.user_id, filter).await?;
    Ok(Json(tasks))
}

/// Get one of the current user's tasks by id.
///
/// # Returns
/// - 200 OK with the task
/// - 404 Not Found if the id doesn't exist or belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .tasks
        .get(id, &user.user_id)
        .await?
        .ok_or_else(|| task_not_found(id, &user.user_id))?;
    Ok(Json(task))
}

/// Update fields of one of the current user's tasks.
///
/// Absent fields are left untouched.
///
/// # Returns
/// - 200 OK with the updated task
/// - 400 Bad Request if the body supplies no fields
/// - 404 Not Found if the id doesn't exist or belongs to another user
/// - 422 Unprocessable Entity if a supplied field is out of bounds
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .tasks
        .update(id, &user.user_id, req)
        .await?
        .ok_or_else(|| task_not_found(id, &user.user_id))?;
    Ok(Json(task))
}

/// Delete one of the current user's tasks.
///
/// # Returns
/// - 200 OK with `{ "message": ..., "task_id": <id> }`
/// - 404 Not Found if the id doesn't exist or belongs to another user
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let deleted = state.db.tasks.delete(id, &user.user_id).await?;
    if !deleted {
        return Err(task_not_found(id, &user.user_id));
    }
    Ok(Json(DeleteTaskResponse::new(id)))
}
