//! Retry policy for transient request failures.

use std::time::Duration;

/// HTTP statuses that are retried while attempts remain.
pub const RETRYABLE_STATUSES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Configuration for exponential backoff retry behavior.
///
/// Attempts are numbered from 0. A failed attempt `n` is retried only while
/// `n < max_retries`, after waiting `base_delay * 2^n` (no jitter).
///
/// # Defaults
///
/// - `max_retries`: 0 (a single attempt)
/// - `base_delay`: 1 second
///
/// # Example
///
/// ```
/// use bold_sdk::executor::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(2)
///     .with_base_delay(Duration::from_millis(200));
///
/// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(200));
/// assert_eq!(policy.delay_for_retry(1), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    pub max_retries: u32,

    /// Delay before the first retry; doubled for each further retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 0;

    /// Default base delay (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base delay.
    ///
    /// # Panics
    ///
    /// Panics if `delay` is zero.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        assert!(!delay.is_zero(), "base_delay must be positive");
        self.base_delay = delay;
        self
    }

    /// Computes the delay to wait after failed attempt `attempt` (0-indexed).
    ///
    /// Saturates instead of overflowing for absurd attempt numbers.
    #[must_use]
    pub fn delay_for_retry(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Returns true if failed attempt `attempt` (0-indexed) may be retried.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Returns true if a response with this status may be retried.
    #[must_use]
    pub fn is_retryable_status(status: http::StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status.as_u16())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
