//! Error types for HTTP operations and provider updates.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for a single provider update request.
///
/// Update failures are never fatal: they are logged and the next tick
/// simply tries again.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The request could not be delivered.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The provider answered with a non-success status code.
    #[error("Provider returned {status}")]
    Status {
        /// HTTP status code
        status: http::StatusCode,
        /// Response body, if valid UTF-8
        body: Option<String>,
    },

    /// The provider accepted the request but refused the update
    /// (DuckDNS answers `KO` for a bad token or unknown domain).
    #[error("Provider rejected the update: {body}")]
    Rejected {
        /// Response body
        body: String,
    },

    /// All retry attempts failed.
    #[error("Update failed after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        #[source]
        last_error: Box<Self>,
    },
}

impl UpdateError {
    /// Returns true if the failure is potentially transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            Self::Http(HttpError::Connection(_) | HttpError::Timeout) => true,
            // Server errors, rate limiting and request timeouts may pass
            Self::Status { status, .. } => {
                status.is_server_error()
                    || *status == http::StatusCode::TOO_MANY_REQUESTS
                    || *status == http::StatusCode::REQUEST_TIMEOUT
            }
            // Configuration problems and explicit refusals will not change on retry
            Self::Http(HttpError::InvalidUrl(_))
            | Self::Rejected { .. }
            | Self::RetriesExhausted { .. } => false,
        }
    }
}
