//! Centralized default constants for the tasklist service.
//!
//! **This module is the single source of truth** for all shared default
//! values. The storage layer, the API server, and the binary reference
//! these constants instead of defining their own magic numbers.

// =============================================================================
// TASK FIELDS
// =============================================================================

/// Maximum title length, counted in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Maximum description length, counted in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Default task creations allowed per user per window.
pub const RATE_LIMIT_CREATES: u64 = 5;

/// Default rate-limit window length in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 10;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP listen port.
pub const SERVER_PORT: u16 = 8000;
