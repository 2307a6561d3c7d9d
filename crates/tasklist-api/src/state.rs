//! Shared application state.

use std::sync::Arc;

use tasklist_db::Database;

use crate::identity::IdentityResolver;
use crate::services::RateLimiter;

/// Application state shared across handlers.
///
/// Built once at startup and cloned per request; every field is a cheap
/// handle over shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Database facade owning the task repository.
    pub db: Database,
    /// Fixed-window limiter guarding task creation.
    pub rate_limiter: RateLimiter,
    /// Resolves the caller's user id for each request.
    pub identity: Arc<dyn IdentityResolver>,
}
