//! Provider update dispatch.

use std::fmt;

use crate::model::{Config, Domain};
use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpRequest, RetryPolicy, UpdateError};

/// DuckDNS update endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.duckdns.org/update";

/// Address pushed for disabled domains.
pub const NULL_IP: &str = "0.0.0.0";

/// Which of the two update requests of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Point enabled domains at the caller's public address.
    Enable,
    /// Point disabled domains at [`NULL_IP`].
    Disable,
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable => f.write_str("enable"),
            Self::Disable => f.write_str("disable"),
        }
    }
}

/// Builds the update URL for one request.
///
/// The provider infers the address from the request origin unless `ip` is
/// given, so the enable request carries no `ip` parameter. Names and token
/// are inserted verbatim: names are restricted to `[A-Za-z0-9-]` and the
/// token is expected to be URL-safe already.
///
/// # Example
///
/// ```
/// use ducky::update::{UpdateKind, update_url};
/// use url::Url;
///
/// let endpoint = Url::parse("https://www.duckdns.org/update").unwrap();
/// let url = update_url(&endpoint, UpdateKind::Disable, &["a", "b"], "T");
/// assert_eq!(url.query(), Some("domains=a,b&token=T&ip=0.0.0.0"));
/// ```
#[must_use]
pub fn update_url(endpoint: &url::Url, kind: UpdateKind, names: &[&str], token: &str) -> url::Url {
    let mut query = format!("domains={}&token={token}", names.join(","));
    if kind == UpdateKind::Disable {
        query.push_str("&ip=");
        query.push_str(NULL_IP);
    }

    let mut url = endpoint.clone();
    url.set_query(Some(&query));
    url
}

/// Outcome of one update cycle: one result per request.
#[derive(Debug)]
pub struct DispatchReport {
    /// Result of the request for enabled domains.
    pub enabled: Result<(), UpdateError>,
    /// Result of the request for disabled domains.
    pub disabled: Result<(), UpdateError>,
}

impl DispatchReport {
    /// Returns true if both requests succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.enabled.is_ok() && self.disabled.is_ok()
    }

    /// Iterates over the failed requests.
    pub fn failures(&self) -> impl Iterator<Item = (UpdateKind, &UpdateError)> {
        [
            (UpdateKind::Enable, &self.enabled),
            (UpdateKind::Disable, &self.disabled),
        ]
        .into_iter()
        .filter_map(|(kind, result)| result.as_ref().err().map(|e| (kind, e)))
    }
}

/// Pushes the state of all domains to the provider.
///
/// Retry behavior lives entirely behind this trait, so neither the scheduler
/// nor the registry changes when the policy does.
pub trait UpdateDispatcher: Send + Sync {
    /// Sends one enable request and one disable request.
    ///
    /// Never fails as a whole; per-request failures are in the report.
    fn push_update(
        &self,
        token: &str,
        domains: &[Domain],
    ) -> impl std::future::Future<Output = DispatchReport> + Send;
}

/// DuckDNS-style dispatcher over an injectable HTTP client.
///
/// Each cycle issues two independent GET requests, concurrently:
///
/// 1. `<endpoint>?domains=<enabled csv>&token=<token>`
/// 2. `<endpoint>?domains=<disabled csv>&token=<token>&ip=0.0.0.0`
///
/// Both requests are sent even when their domain list is empty.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct DuckDnsDispatcher<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    endpoint: url::Url,
    retry_policy: RetryPolicy,
}

impl<H> DuckDnsDispatcher<H, TokioSleeper> {
    /// Creates a dispatcher with the default (single attempt) retry policy.
    #[must_use]
    pub fn new(client: H, endpoint: url::Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            endpoint,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> DuckDnsDispatcher<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> DuckDnsDispatcher<H, S2> {
        DuckDnsDispatcher {
            client: self.client,
            sleeper,
            endpoint: self.endpoint,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient, S: Sleeper> DuckDnsDispatcher<H, S> {
    /// Executes a single request attempt.
    async fn execute_request(&self, request: &HttpRequest) -> Result<(), UpdateError> {
        let response = self.client.request(request.clone()).await?;

        if !response.is_success() {
            return Err(UpdateError::Status {
                status: response.status,
                body: response.body_text().map(ToString::to_string),
            });
        }

        match response.rejection() {
            Some(body) => Err(UpdateError::Rejected {
                body: body.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Sends one request, retrying transient failures per the policy.
    async fn send_with_retry(
        &self,
        kind: UpdateKind,
        names: &[&str],
        token: &str,
    ) -> Result<(), UpdateError> {
        let request = HttpRequest::get(update_url(&self.endpoint, kind, names, token));
        tracing::debug!("Sending {kind} update for [{}]", names.join(","));

        let mut attempt = 1;
        loop {
            let error = match self.execute_request(&request).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            if !error.is_retryable() || !self.retry_policy.retries_enabled() {
                return Err(error);
            }

            let Some(delay) = self.retry_policy.backoff_after(attempt) else {
                return Err(UpdateError::RetriesExhausted {
                    attempts: attempt,
                    last_error: Box::new(error),
                });
            };

            tracing::warn!(
                "{kind} update attempt {attempt} failed ({error}), retrying in {}s",
                delay.as_secs()
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

impl<H: HttpClient, S: Sleeper> UpdateDispatcher for DuckDnsDispatcher<H, S> {
    async fn push_update(&self, token: &str, domains: &[Domain]) -> DispatchReport {
        let (enabled, disabled) = Config::partition_names(domains);

        let (enabled, disabled) = tokio::join!(
            self.send_with_retry(UpdateKind::Enable, &enabled, token),
            self.send_with_retry(UpdateKind::Disable, &disabled, token),
        );

        DispatchReport { enabled, disabled }
    }
}
