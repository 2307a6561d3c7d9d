//! Service layer for business logic.

pub mod rate_limit;

pub use rate_limit::{MemoryCounterStore, RateLimiter, RedisCounterStore};
