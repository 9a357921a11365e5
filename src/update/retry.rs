//! Backoff for re-sending a failed update request.

use std::time::Duration;

/// How often a failed update request is re-sent within one cycle.
///
/// The scheduler calls the provider again on its next tick anyway, so the
/// default sends each request once and reports the failure. Raising
/// `max_attempts` re-sends transient failures after a growing pause:
/// `initial_delay * multiplier^n`, never longer than `max_delay`.
///
/// ```
/// use ducky::update::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(3)
///     .with_initial_delay(Duration::from_secs(2));
///
/// assert_eq!(policy.backoff_after(1), Some(Duration::from_secs(2)));
/// assert_eq!(policy.backoff_after(2), Some(Duration::from_secs(4)));
/// assert_eq!(policy.backoff_after(3), None);
/// assert_eq!(RetryPolicy::default().backoff_after(1), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Requests sent per cycle, counting the first one. Always at least 1.
    pub max_attempts: u32,
    /// Pause before the second request.
    pub initial_delay: Duration,
    /// Upper bound for any pause.
    pub max_delay: Duration,
    /// Growth factor between consecutive pauses.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// One request per cycle; the pauses only matter once retries are enabled.
    pub const SINGLE_ATTEMPT: Self = Self {
        max_attempts: 1,
        initial_delay: Duration::from_secs(5),
        max_delay: Duration::from_secs(60),
        multiplier: 2.0,
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::SINGLE_ATTEMPT
    }

    /// # Panics
    ///
    /// Panics if `max_attempts` is 0.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(max_attempts > 0, "max_attempts must be at least 1");
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// # Panics
    ///
    /// Panics if `multiplier` is not a positive number.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Returns true when a failed request may be sent again.
    #[must_use]
    pub const fn retries_enabled(&self) -> bool {
        self.max_attempts > 1
    }

    /// Pause to take after `failed` attempts have failed, or `None` once the
    /// attempt budget is spent.
    #[must_use]
    pub fn backoff_after(&self, failed: u32) -> Option<Duration> {
        if failed == 0 || failed >= self.max_attempts {
            return None;
        }

        let exponent = i32::try_from(failed - 1).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Some(Duration::from_secs_f64(
            secs.min(self.max_delay.as_secs_f64()),
        ))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
