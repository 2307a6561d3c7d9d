//! Request identity resolution.
//!
//! Every task operation is scoped to a user id, so each request must
//! resolve one before any handler runs. The resolver is injected into
//! [`AppState`](crate::AppState) rather than baked into the handlers:
//! deployments behind a trusting gateway read it from a header, local
//! development pins a fixed user, and tests swap in whatever they need.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's user id in gateway deployments.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the caller's user id from request metadata.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// The user id for this request, or `None` when the request carries
    /// no usable identity.
    async fn resolve(&self, parts: &Parts) -> Option<String>;
}

/// Reads the identity from the [`USER_ID_HEADER`] header.
///
/// The header is trusted as-is; authenticating it is the fronting
/// gateway's job. A missing, empty, or non-UTF-8 value resolves to no
/// identity.
#[derive(Debug, Clone, Default)]
pub struct HeaderIdentity;

#[async_trait]
impl IdentityResolver for HeaderIdentity {
    async fn resolve(&self, parts: &Parts) -> Option<String> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }
}

/// Resolves every request to one fixed user id, for local development.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn resolve(&self, _parts: &Parts) -> Option<String> {
        Some(self.user_id.clone())
    }
}

/// Build the resolver selected by `IDENTITY_MODE`.
///
/// `IDENTITY_MODE=static` resolves every request to
/// `IDENTITY_STATIC_USER` (default `user-A-123`); anything else reads
/// the `X-User-Id` header.
pub fn resolver_from_env() -> Arc<dyn IdentityResolver> {
    match std::env::var("IDENTITY_MODE").as_deref() {
        Ok("static") => {
            let user_id = std::env::var("IDENTITY_STATIC_USER")
                .unwrap_or_else(|_| "user-A-123".to_string());
            info!(user_id = %user_id, "Identity resolution: static user");
            Arc::new(StaticIdentity::new(user_id))
        }
        _ => {
            info!(header = USER_ID_HEADER, "Identity resolution: trusted header");
            Arc::new(HeaderIdentity)
        }
    }
}

/// The resolved caller identity, available to handlers as an extractor.
///
/// Rejects the request with 401 when the configured resolver yields no
/// identity.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.identity.resolve(parts).await {
            Some(user_id) => Ok(CurrentUser { user_id }),
            None => Err(ApiError::Unauthorized(
                "User identity required".to_string(),
            )),
        }
    }
}
