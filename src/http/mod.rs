//! Transport layer for talking to the Bold API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Transport failure classification ([`TransportError`], [`IsRetryable`])

mod client;
mod error;
mod request;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::{ReqwestClient, USER_AGENT};
pub use error::{IsRetryable, TransportError, is_transient_message};
pub use request::{HttpClient, HttpRequest, HttpResponse};
