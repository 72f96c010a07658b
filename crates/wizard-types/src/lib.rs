//! Shared types for the sui-token-wizard workspace.
//!
//! This crate holds the small pieces every other crate needs and that would
//! otherwise be duplicated:
//!
//! - [`RetryConfig`] - retry policy for network queries
//! - [`env_utils`] - environment variable parsing with defaults
//! - [`address`] - address and object ID normalization
//! - [`type_parsing`] - Move type strings, coin wrapper extraction, canonical type names

pub mod address;
pub mod env_utils;
pub mod type_parsing;

pub use address::{normalize_address, normalize_address_short};
pub use type_parsing::{canonical_type_name, parse_type_tag, same_type, wrapped_type_argument};

use std::time::Duration;

/// Default number of retries for RPC queries.
pub const DEFAULT_RETRIES: usize = 3;

/// Configuration for retry behavior on network operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Number of retry attempts after the first failure.
    pub retries: usize,
    /// Initial backoff duration between retries.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl RetryConfig {
    /// Create a new RetryConfig with the specified parameters.
    pub fn new(retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, 0, 0)
    }

    /// Backoff to wait before retry number `attempt` (1-based), doubling up to `max_backoff`.
    pub fn backoff_for(&self, attempt: usize) -> Duration {
        let mut backoff = self.initial_backoff;
        for _ in 1..attempt {
            backoff = std::cmp::min(backoff * 2, self.max_backoff);
        }
        std::cmp::min(backoff, self.max_backoff)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_millis(2000),
        }
    }
}
