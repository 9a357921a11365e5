//! Wire values exchanged with the update endpoint.
//!
//! The provider takes its whole input from the query string and answers with
//! a short plain-text body, so requests carry no headers and responses keep
//! only the status line and the text.

use super::HttpError;

/// Body prefix the provider uses to refuse an update.
pub const REJECTION_PREFIX: &str = "KO";

/// One update call: a method and the fully built URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: http::Method,
    pub url: url::Url,
}

impl HttpRequest {
    /// A GET to `url`, the only verb the update endpoint accepts.
    #[must_use]
    pub const fn get(url: url::Url) -> Self {
        Self {
            method: http::Method::GET,
            url,
        }
    }
}

/// What came back from the endpoint.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body decoded as UTF-8 with surrounding whitespace removed.
    ///
    /// `None` when the bytes are not valid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok().map(str::trim)
    }

    /// The answer text when the provider refused the update.
    ///
    /// DuckDNS replies `200 KO` for a bad token or an unknown domain, so this
    /// is checked independently of the status.
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        self.body_text()
            .filter(|text| text.starts_with(REJECTION_PREFIX))
    }
}

/// Sends update requests.
///
/// Implemented by [`ReqwestClient`](super::ReqwestClient) in production and by
/// scripted clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs `req` and buffers the whole answer.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when nothing usable came back: the connection
    /// failed, the request timed out, or the URL was refused.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
