//! Test fixtures for database integration tests.
//!
//! Each [`TestDatabase`] is an isolated in-memory SQLite database with
//! the real schema applied, so tests need no external infrastructure
//! and cannot see each other's rows.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tasklist_db::test_fixtures::TestDatabase;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::new().await.unwrap();
//!     let db = &test_db.db;
//!
//!     // Run your tests...
//! }
//! ```

use crate::pool::PoolConfig;
use crate::Database;
use tasklist_core::{Error, Result};

/// In-memory database URL used by every fixture.
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// The tasks schema, shared with the embedded sqlx migrations.
const SCHEMA_SQL: &str = include_str!("../../../migrations/0001_create_tasks.sql");

/// An isolated in-memory database for one test.
pub struct TestDatabase {
    pub db: Database,
}

impl TestDatabase {
    /// Create a fresh in-memory database with the schema applied.
    ///
    /// The pool is pinned to a single connection: every new connection
    /// to `sqlite::memory:` opens its own empty database, so a wider
    /// pool would scatter rows across invisible databases.
    pub async fn new() -> Result<Self> {
        let config = PoolConfig::new().max_connections(1).min_connections(1);
        let db = Database::connect_with_config(TEST_DATABASE_URL, config).await?;

        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&db.pool)
            .await
            .map_err(Error::Database)?;

        Ok(Self { db })
    }
}
