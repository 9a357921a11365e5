//! Update interval in whole minutes.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Minutes between two update cycles, always within `MIN..=MAX`.
///
/// # Example
///
/// ```
/// use ducky::model::Interval;
/// use std::time::Duration;
///
/// let interval = Interval::new(5).unwrap();
/// assert_eq!(interval.period(), Duration::from_secs(300));
/// assert!(Interval::new(0).is_err());
/// assert!(Interval::new(61).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Interval(u32);

impl Interval {
    /// Smallest accepted interval (minutes).
    pub const MIN: u32 = 1;

    /// Largest accepted interval (minutes).
    pub const MAX: u32 = 60;

    /// Interval used for a freshly created document.
    pub const DEFAULT: Self = Self(5);

    /// Validates a minute count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IntervalOutOfRange`] unless
    /// `MIN <= minutes <= MAX`.
    pub fn new(minutes: i64) -> Result<Self, ValidationError> {
        u32::try_from(minutes)
            .ok()
            .filter(|m| (Self::MIN..=Self::MAX).contains(m))
            .map(Self)
            .ok_or(ValidationError::IntervalOutOfRange(minutes))
    }

    /// Returns the interval in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Returns the timer period.
    #[must_use]
    pub const fn period(self) -> Duration {
        Duration::from_secs(self.0 as u64 * 60)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Interval {
    type Error = ValidationError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> Self {
        interval.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.0)
    }
}
