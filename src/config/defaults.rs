//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default location of the persisted domain document.
pub const DOCUMENT_PATH: &str = "config.json";

/// Default output file for `ducky init`.
pub const SETTINGS_FILE: &str = "ducky.toml";

/// Default provider update endpoint.
pub const ENDPOINT: &str = crate::update::DEFAULT_ENDPOINT;

/// Default per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default maximum number of attempts per update request (no retry).
pub const RETRY_MAX_ATTEMPTS: u32 = 1;

/// Default initial retry delay in seconds.
pub const RETRY_INITIAL_DELAY_SECS: u64 = 5;

/// Default maximum retry delay in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 60;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Default status line template.
pub const STATUS_TEMPLATE: &str = crate::scheduler::DEFAULT_STATUS_TEMPLATE;

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    Duration::from_secs(RETRY_INITIAL_DELAY_SECS)
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_secs(RETRY_MAX_DELAY_SECS)
}
