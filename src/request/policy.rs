//! Retry policy configuration for fetch operations.

use std::time::Duration;

/// Configuration for randomized exponential backoff.
///
/// Controls how many times [`RetryRequest`](super::RetryRequest) attempts a
/// fetch and how long it waits between attempts.
///
/// # Defaults
///
/// - `max_attempts`: 3
/// - `initial_delay`: 100 milliseconds
/// - `max_delay`: 2 seconds
/// - `multiplier`: 2.0
/// - `jitter`: enabled (each delay is scaled by a random factor in `[0.5, 1.0]`)
/// - `deadline`: none
///
/// # Example
///
/// ```
/// use rexsl_test::RetryPolicy;
/// use std::time::Duration;
///
/// let custom = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_initial_delay(Duration::from_millis(50))
///     .with_max_delay(Duration::from_secs(1))
///     .with_multiplier(1.5)
///     .with_deadline(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    ///
    /// A value of 1 means no retries; only the initial attempt is made.
    pub max_attempts: u32,

    /// Delay before the first retry.
    ///
    /// Subsequent delays are computed by multiplying by `multiplier`.
    pub initial_delay: Duration,

    /// Maximum delay between retries, before jitter.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,

    /// Whether delays are randomized.
    pub jitter: bool,

    /// Wall-clock budget spanning all attempts.
    ///
    /// When set, no further attempt starts if the elapsed time plus the next
    /// delay would exceed it. A single attempt is bounded only by the wire.
    pub deadline: Option<Duration>,
}

impl RetryPolicy {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default initial delay (100 milliseconds).
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);

    /// Default maximum delay (2 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(2);

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
            jitter: true,
            deadline: None,
        }
    }

    /// Sets the maximum number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is less than 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(
            max_attempts >= Self::MIN_MAX_ATTEMPTS,
            "max_attempts must be at least 1"
        );
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the initial delay between retries.
    ///
    /// Zero delay is supported (useful for testing with [`InstantSleeper`])
    /// but creates a tight retry loop.
    ///
    /// [`InstantSleeper`]: crate::time::InstantSleeper
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the delay multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not positive (must be > 0.0).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Enables or disables randomized delays.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets a deadline spanning all attempts.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Computes the delay for a given retry number (0-indexed), before jitter.
    ///
    /// # Arguments
    ///
    /// * `retry` - The retry number (0 = delay before first retry, 1 = delay before second retry, etc.)
    ///
    /// # Returns
    ///
    /// The delay to wait before this retry, capped at `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        // Safe cast: retry values are small (bounded by max_attempts)
        #[allow(clippy::cast_possible_wrap)]
        let multiplier = self.multiplier.powi(retry as i32);
        let delay_secs = self.initial_delay.as_secs_f64() * multiplier;
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Computes the delay actually waited before a retry, jitter applied.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let delay = self.delay_for_retry(retry);
        if self.jitter {
            delay.mul_f64(rand::random::<f64>().mul_add(0.5, 0.5))
        } else {
            delay
        }
    }

    /// Returns true if another attempt may follow the given one.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt number (1 = first attempt, 2 = first retry, etc.)
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
