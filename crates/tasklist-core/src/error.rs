//! Error types for the tasklist service.

use thiserror::Error;

/// Result type alias using the tasklist Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tasklist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Update request carried no fields
    #[error("No fields provided for update")]
    EmptyUpdate,

    /// Per-user creation limit exceeded for the current window
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Counter store operation failed
    #[error("Counter store error: {0}")]
    CounterStore(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("title must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: title must not be empty");
    }

    #[test]
    fn test_error_display_empty_update() {
        assert_eq!(Error::EmptyUpdate.to_string(), "No fields provided for update");
    }

    #[test]
    fn test_error_display_rate_limited() {
        let err = Error::RateLimited { retry_after_secs: 7 };
        assert_eq!(err.to_string(), "Rate limit exceeded, retry after 7s");
    }

    #[test]
    fn test_error_display_counter_store() {
        let err = Error::CounterStore("connection refused".to_string());
        assert_eq!(err.to_string(), "Counter store error: connection refused");
    }

    #[test]
    fn test_error_from_sqlx() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
