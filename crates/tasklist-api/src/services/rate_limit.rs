//! Fixed-window rate limiting for task creation.
//!
//! Counts creates per user in a fixed window and rejects the request
//! once the window's budget is spent. Counters live in Redis so the
//! limit holds across replicas; when Redis is unreachable the limiter
//! fails open and creates proceed uncounted.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RATE_LIMIT_ENABLED`: Set to "false" to disable limiting (default: true)
//! - `RATE_LIMIT_CREATES`: Creates allowed per window (default: 5)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length in seconds (default: 10)
//! - `REDIS_URL`: Redis connection URL (default: redis://127.0.0.1:6379)

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tasklist_core::defaults;
use tasklist_core::{CounterStore, Error, Result, WindowCount};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Counter key prefix, namespacing limiter state in a shared Redis.
const KEY_PREFIX: &str = "tl:ratelimit:";

/// Counter store backed by Redis.
///
/// One key per user, incremented atomically. `PEXPIRE NX` arms the
/// expiry on the first increment of a window only, so later increments
/// never extend it (requires Redis 7+).
#[derive(Clone)]
pub struct RedisCounterStore {
    connection: ConnectionManager,
}

impl RedisCounterStore {
    /// Connect to Redis at `url`. Fails if the initial connection
    /// cannot be established.
    pub async fn connect(url: &str) -> redis::RedisResult<Self> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr_with_expiry(&self, key: &str, window: Duration) -> Result<WindowCount> {
        let mut conn = self.connection.clone();
        let window_ms = window.as_millis() as i64;

        let (count, ttl_ms): (u64, i64) = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("PEXPIRE")
            .arg(key)
            .arg(window_ms)
            .arg("NX")
            .ignore()
            .cmd("PTTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::CounterStore(e.to_string()))?;

        // PTTL reports -1 for a key without expiry; treat that as a
        // fresh window rather than an unbounded one.
        let ttl = if ttl_ms > 0 {
            Duration::from_millis(ttl_ms as u64)
        } else {
            window
        };

        Ok(WindowCount { count, ttl })
    }
}

struct MemoryWindow {
    count: u64,
    deadline: tokio::time::Instant,
}

/// In-process counter store for tests and single-instance deployments.
#[derive(Default)]
pub struct MemoryCounterStore {
    windows: Mutex<HashMap<String, MemoryWindow>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn incr_with_expiry(&self, key: &str, window: Duration) -> Result<WindowCount> {
        let now = tokio::time::Instant::now();
        let mut windows = self.windows.lock().await;

        let entry = windows.entry(key.to_string()).or_insert(MemoryWindow {
            count: 0,
            deadline: now + window,
        });
        if entry.deadline <= now {
            entry.count = 0;
            entry.deadline = now + window;
        }
        entry.count += 1;

        Ok(WindowCount {
            count: entry.count,
            ttl: entry.deadline - now,
        })
    }
}

/// Per-user fixed-window limiter for task creation.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    /// Counter store (None if disabled).
    store: Option<Arc<dyn CounterStore>>,
    /// Creates allowed per window.
    max_creates: u64,
    /// Window length.
    window: Duration,
}

impl RateLimiter {
    /// Create a rate limiter from environment configuration.
    ///
    /// Reads:
    /// - `RATE_LIMIT_ENABLED` (default: true)
    /// - `RATE_LIMIT_CREATES` (default: 5)
    /// - `RATE_LIMIT_WINDOW_SECS` (default: 10)
    /// - `REDIS_URL` (default: redis://127.0.0.1:6379)
    pub async fn from_env() -> Self {
        let enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let max_creates: u64 = std::env::var("RATE_LIMIT_CREATES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::RATE_LIMIT_CREATES);

        let window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::RATE_LIMIT_WINDOW_SECS);

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let store: Option<Arc<dyn CounterStore>> = if enabled {
            match RedisCounterStore::connect(&redis_url).await {
                Ok(store) => {
                    info!(
                        "Rate limiting enabled ({} creates per {}s window)",
                        max_creates, window_secs
                    );
                    Some(Arc::new(store))
                }
                Err(e) => {
                    warn!("Failed to connect to Redis, rate limiting disabled: {}", e);
                    None
                }
            }
        } else {
            info!("Rate limiting disabled via RATE_LIMIT_ENABLED=false");
            None
        };

        Self {
            inner: Arc::new(RateLimiterInner {
                store,
                max_creates,
                window: Duration::from_secs(window_secs),
            }),
        }
    }

    /// Create a disabled limiter (for testing or when Redis unavailable).
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                store: None,
                max_creates: defaults::RATE_LIMIT_CREATES,
                window: Duration::from_secs(defaults::RATE_LIMIT_WINDOW_SECS),
            }),
        }
    }

    /// Create a limiter over an explicit counter store.
    pub fn with_store(
        store: Arc<dyn CounterStore>,
        max_creates: u64,
        window: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                store: Some(store),
                max_creates,
                window,
            }),
        }
    }

    /// Check if limiting is enabled.
    pub fn is_enabled(&self) -> bool {
        self.inner.store.is_some()
    }

    /// Record one create attempt for `user_id`.
    ///
    /// Returns `Err(Error::RateLimited)` once the user has exhausted the
    /// window's budget. Counter store failures are logged and the
    /// request is allowed through.
    pub async fn check(&self, user_id: &str) -> Result<()> {
        let store = match &self.inner.store {
            Some(store) => store,
            None => return Ok(()),
        };

        let key = format!("{}{}", KEY_PREFIX, user_id);
        match store.incr_with_expiry(&key, self.inner.window).await {
            Ok(WindowCount { count, ttl }) if count > self.inner.max_creates => {
                let retry_after_secs = retry_after_secs(ttl);
                debug!(
                    "Rate limit exceeded for {}: {} > {} (retry after {}s)",
                    user_id, count, self.inner.max_creates, retry_after_secs
                );
                Err(Error::RateLimited { retry_after_secs })
            }
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Counter store error, allowing request: {}", e);
                Ok(())
            }
        }
    }
}

/// Seconds until the window expires, rounded up and never zero, so the
/// advertised wait always lands in the next window.
fn retry_after_secs(ttl: Duration) -> u64 {
    let mut secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs += 1;
    }
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limited(max_creates: u64, window_secs: u64) -> RateLimiter {
        RateLimiter::with_store(
            Arc::new(MemoryCounterStore::new()),
            max_creates,
            Duration::from_secs(window_secs),
        )
    }

    struct FailingStore;

    #[async_trait]
    impl CounterStore for FailingStore {
        async fn incr_with_expiry(&self, _key: &str, _window: Duration) -> Result<WindowCount> {
            Err(Error::CounterStore("connection refused".to_string()))
        }
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(retry_after_secs(Duration::from_secs(10)), 10);
        assert_eq!(retry_after_secs(Duration::from_millis(2500)), 3);
        assert_eq!(retry_after_secs(Duration::from_millis(1)), 1);
        assert_eq!(retry_after_secs(Duration::ZERO), 1);
    }

    #[tokio::test]
    async fn test_memory_store_counts_per_key() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(10);

        let first = store.incr_with_expiry("tl:ratelimit:a", window).await.unwrap();
        let second = store.incr_with_expiry("tl:ratelimit:a", window).await.unwrap();
        let other = store.incr_with_expiry("tl:ratelimit:b", window).await.unwrap();

        assert_eq!(first.count, 1);
        assert_eq!(second.count, 2);
        assert_eq!(other.count, 1);
        assert!(second.ttl <= window);
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_window_expires() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(10);

        for _ in 0..3 {
            store.incr_with_expiry("tl:ratelimit:a", window).await.unwrap();
        }

        tokio::time::advance(Duration::from_secs(11)).await;

        let fresh = store.incr_with_expiry("tl:ratelimit:a", window).await.unwrap();
        assert_eq!(fresh.count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_later_increments_keep_deadline() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(10);

        let first = store.incr_with_expiry("tl:ratelimit:a", window).await.unwrap();
        tokio::time::advance(Duration::from_secs(4)).await;
        let second = store.incr_with_expiry("tl:ratelimit:a", window).await.unwrap();

        assert_eq!(first.ttl, Duration::from_secs(10));
        assert_eq!(second.ttl, Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_check_allows_up_to_limit() {
        let limiter = limited(3, 60);
        for _ in 0..3 {
            assert!(limiter.check("user-A-123").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_check_rejects_over_limit_with_retry_after() {
        let limiter = limited(2, 60);
        limiter.check("user-A-123").await.unwrap();
        limiter.check("user-A-123").await.unwrap();

        let err = limiter.check("user-A-123").await.unwrap_err();
        match err {
            Error::RateLimited { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
                assert!(retry_after_secs <= 60);
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_counts_users_independently() {
        let limiter = limited(1, 60);
        limiter.check("user-A-123").await.unwrap();
        assert!(limiter.check("user-A-123").await.is_err());
        assert!(limiter.check("user-B-456").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_resets_after_window() {
        let limiter = limited(1, 10);
        limiter.check("user-A-123").await.unwrap();
        assert!(limiter.check("user-A-123").await.is_err());

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(limiter.check("user-A-123").await.is_ok());
    }

    #[tokio::test]
    async fn test_check_fails_open_on_store_error() {
        let limiter = RateLimiter::with_store(
            Arc::new(FailingStore),
            1,
            Duration::from_secs(10),
        );
        for _ in 0..5 {
            assert!(limiter.check("user-A-123").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_disabled_limiter_allows_everything() {
        let limiter = RateLimiter::disabled();
        assert!(!limiter.is_enabled());
        for _ in 0..20 {
            assert!(limiter.check("user-A-123").await.is_ok());
        }
    }
}
