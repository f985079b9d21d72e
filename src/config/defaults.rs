//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default HTTP method.
pub const METHOD: &str = "GET";

/// Default maximum number of attempts, including the first one.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 100;

/// Default maximum delay between retries in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 2_000;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Default per-exchange timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default file written by `init`.
pub const CONFIG_FILE: &str = "rexsl-fetch.toml";

/// Default per-exchange timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
