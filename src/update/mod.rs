//! Update layer: pushes domain state to the dynamic-DNS provider.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Provider updates ([`UpdateDispatcher`], [`DuckDnsDispatcher`], [`DispatchReport`])
//! - Retry policy configuration ([`RetryPolicy`])

mod client;
mod dispatcher;
mod error;
mod http;
mod retry;

#[cfg(test)]
mod http_tests;
#[cfg(test)]
mod retry_tests;

pub use client::ReqwestClient;
pub use dispatcher::{
    DEFAULT_ENDPOINT, DispatchReport, DuckDnsDispatcher, NULL_IP, UpdateDispatcher, UpdateKind,
    update_url,
};
pub use error::{HttpError, UpdateError};
pub use http::{HttpClient, HttpRequest, HttpResponse, REJECTION_PREFIX};
pub use retry::RetryPolicy;
