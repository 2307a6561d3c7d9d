//! HTTP error mapping.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

/// API-level error with an HTTP status for every failure the handlers
/// can produce.
///
/// Responses carry the body `{"error": "<message>"}`. A task that does
/// not exist and a task owned by another user map to the same
/// [`ApiError::NotFound`], so the two cases are indistinguishable on
/// the wire.
#[derive(Debug)]
pub enum ApiError {
    /// Storage or counter-store failure (500).
    Internal(tasklist_core::Error),
    /// Caller identity could not be resolved (401).
    Unauthorized(String),
    /// No task matches the id for this user (404).
    NotFound(String),
    /// Structurally invalid request, e.g. an empty update payload (400).
    BadRequest(String),
    /// Field values out of bounds (422).
    Validation(String),
    /// Per-user creation limit exceeded (429 plus `Retry-After`).
    RateLimited { retry_after_secs: u64 },
}

impl From<tasklist_core::Error> for ApiError {
    fn from(err: tasklist_core::Error) -> Self {
        match &err {
            tasklist_core::Error::InvalidInput(msg) => ApiError::Validation(msg.clone()),
            tasklist_core::Error::EmptyUpdate => ApiError::BadRequest(err.to_string()),
            tasklist_core::Error::RateLimited { retry_after_secs } => ApiError::RateLimited {
                retry_after_secs: *retry_after_secs,
            },
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::RateLimited { retry_after_secs } => {
                let body = Json(serde_json::json!({
                    "error": format!("Rate limit exceeded, retry after {}s", retry_after_secs),
                }));
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, retry_after_secs.into());
                return response;
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::Error;

    #[test]
    fn test_invalid_input_maps_to_422() {
        let err: ApiError = Error::InvalidInput("Title cannot be empty".to_string()).into();
        assert!(matches!(err, ApiError::Validation(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_empty_update_maps_to_400() {
        let err: ApiError = Error::EmptyUpdate.into();
        assert!(matches!(err, ApiError::BadRequest(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rate_limited_maps_to_429_with_retry_after() {
        let err: ApiError = Error::RateLimited {
            retry_after_secs: 7,
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            &header::HeaderValue::from(7u64)
        );
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let err: ApiError = Error::CounterStore("connection refused".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_renders_error_body() {
        let response = ApiError::NotFound("Task 7 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
