//! Sleep abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait so retry backoff can be skipped
//! in tests while production code blocks the calling thread.

use std::time::Duration;

/// Abstraction over blocking waits.
///
/// [`RetryRequest`](crate::RetryRequest) calls this between attempts.
///
/// # Example
///
/// ```
/// use rexsl_test::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// // Returns immediately
/// InstantSleeper.sleep(Duration::from_secs(3600));
/// ```
pub trait Sleeper: Send + Sync {
    /// Blocks the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Production sleeper that blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Sleeper that returns immediately, for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    fn sleep(&self, _duration: Duration) {}
}
