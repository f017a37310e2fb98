//! Error types for the transport layer.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong without dictating recovery strategy; the
/// executor decides whether to retry via [`IsRetryable`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// connection resets and TLS handshake failures. Only the first three
    /// are retried.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport's own timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The exchange failed after the connection was established
    /// (body read, redirect loop, decoding).
    #[error("Protocol error: {0}")]
    Protocol(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps any error as a connection failure.
    pub fn connection(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Connection(source.into())
    }

    /// Wraps any error as a failure after the connection was established.
    pub fn protocol(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Protocol(source.into())
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants a retry attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for TransportError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::InvalidUrl(_) => false,
            Self::Connection(source) | Self::Protocol(source) => {
                is_transient_chain(source.as_ref())
            }
        }
    }
}

/// Returns true if `error` or any of its sources reads as transient.
///
/// Wrapping errors (reqwest, hyper) keep the OS-level reason two or three
/// sources deep, so the top-level message alone is not enough.
fn is_transient_chain(error: &(dyn std::error::Error + 'static)) -> bool {
    std::iter::successors(Some(error), |e| e.source())
        .any(|e| is_transient_message(&e.to_string()))
}

/// Substrings that mark an otherwise untyped failure message as transient.
const TRANSIENT_MARKERS: [&str; 8] = [
    "network",
    "dns error",
    "timeout",
    "timed out",
    "econnreset",
    "connection reset",
    "econnrefused",
    "connection refused",
];

/// Classifies a failure message as transient by looking for network, DNS,
/// timeout, connection-reset or connection-refused markers.
#[must_use]
pub fn is_transient_message(message: &str) -> bool {
    let message = message.to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}
