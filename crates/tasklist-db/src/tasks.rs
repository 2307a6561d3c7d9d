//! Task repository implementation.

use async_trait::async_trait;
use sqlx::SqlitePool;

use tasklist_core::{
    CreateTaskRequest, Error, Result, Task, TaskFilter, TaskRepository, UpdateTaskRequest,
};

use crate::filter::{QueryParam, TaskFilterQueryBuilder};

/// Columns returned by every task query.
const TASK_COLUMNS: &str = "id, user_id, title, description, is_done";

/// SQLite implementation of TaskRepository.
///
/// Every statement carries the ownership predicate (`id = ? AND
/// user_id = ?`, or the filter builder's `user_id = ?` for lists)
/// inside the statement itself; rows are never fetched first and
/// checked afterwards. Each operation is a single statement on a
/// pooled connection, so acquire and release are scoped to the call.
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Create a new SqliteTaskRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, user_id: &str, req: CreateTaskRequest) -> Result<Task> {
        req.validate()?;

        let sql = format!(
            "INSERT INTO tasks (user_id, title, description) VALUES (?, ?, ?) RETURNING {}",
            TASK_COLUMNS
        );
        let task: Task = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(&req.title)
            .bind(&req.description)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(task)
    }

    async fn get(&self, id: i64, user_id: &str) -> Result<Option<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = ? AND user_id = ?",
            TASK_COLUMNS
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list(&self, user_id: &str, filter: TaskFilter) -> Result<Vec<Task>> {
        let (clause, params) = TaskFilterQueryBuilder::new(user_id, filter).build();
        let sql = format!(
            "SELECT {} FROM tasks WHERE {} ORDER BY id DESC",
            TASK_COLUMNS, clause
        );

        let mut q = sqlx::query_as(&sql);
        for param in params {
            q = match param {
                QueryParam::Bool(b) => q.bind(b),
                QueryParam::String(s) => q.bind(s),
            };
        }

        q.fetch_all(&self.pool).await.map_err(Error::Database)
    }

    async fn update(
        &self,
        id: i64,
        user_id: &str,
        req: UpdateTaskRequest,
    ) -> Result<Option<Task>> {
        req.validate()?;

        // Closed set of updatable columns: the SET list is assembled from
        // fixed fragments only, values are always bound as parameters.
        let mut updates: Vec<&str> = Vec::new();
        if req.title.is_some() {
            updates.push("title = ?");
        }
        if req.description.is_some() {
            updates.push("description = ?");
        }
        if req.is_done.is_some() {
            updates.push("is_done = ?");
        }

        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ? AND user_id = ?",
            updates.join(", ")
        );

        let mut q = sqlx::query(&sql);
        if let Some(ref title) = req.title {
            q = q.bind(title);
        }
        if let Some(ref description) = req.description {
            q = q.bind(description);
        }
        if let Some(is_done) = req.is_done {
            q = q.bind(is_done);
        }

        let result = q
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        // The guard lives in the UPDATE itself, so zero affected rows
        // means no row exists for (id, user_id). SQLite counts no-op
        // value writes as affected rows, so a no-change update still
        // reports the row.
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id, user_id).await
    }

    async fn delete(&self, id: i64, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
