//! # tasklist-db
//!
//! SQLite storage layer for the tasklist service.
//!
//! This crate provides:
//! - Connection pool management
//! - The task repository, with every statement scoped to the owning user
//! - The list filter query builder with literal-match search
//!
//! ## Example
//!
//! ```rust,ignore
//! use tasklist_db::Database;
//! use tasklist_core::{CreateTaskRequest, TaskRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:tasklist.db").await?;
//!     db.migrate().await?;
//!
//!     let task = db
//!         .tasks
//!         .create(
//!             "user-A-123",
//!             CreateTaskRequest {
//!                 title: "Buy milk".to_string(),
//!                 description: None,
//!             },
//!         )
//!         .await?;
//!
//!     println!("Created task: {}", task.id);
//!     Ok(())
//! }
//! ```

pub mod filter;
pub mod pool;
pub mod tasks;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use TestDatabase
pub mod test_fixtures;

// Re-export core types
pub use tasklist_core::*;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// Re-export repository implementations
pub use filter::{QueryParam, TaskFilterQueryBuilder};
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use tasks::SqliteTaskRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::SqlitePool,
    /// Task repository, scoped to the owning user on every call.
    pub tasks: SqliteTaskRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            tasks: SqliteTaskRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
