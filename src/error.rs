//! The public error type of the SDK.
//!
//! Every fallible operation returns `Result<T, BoldError>`. Exactly one
//! [`ErrorKind`] applies to each error instance, and each kind carries its
//! own fields.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::executor::Issue;

/// Discriminant of a [`BoldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure or unparsable success body.
    Network,
    /// Non-2xx status that was not retried, or retries ran out.
    Http,
    /// Body parsed but failed schema validation.
    InvalidResponse,
    /// 2xx response carrying an application error array.
    ApiError,
    /// Required configuration is missing or invalid.
    Config,
    /// The per-attempt deadline elapsed.
    Timeout,
    /// The caller's cancellation token fired.
    Aborted,
}

impl ErrorKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Http => "http",
            Self::InvalidResponse => "invalid_response",
            Self::ApiError => "api_error",
            Self::Config => "config",
            Self::Timeout => "timeout",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the request executor and the API facade.
#[derive(Debug, Error)]
pub enum BoldError {
    /// Transport failure, or a success body that is not valid JSON.
    #[error("{message}")]
    Network {
        /// Human-readable description
        message: String,
        /// Underlying failure, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Non-2xx HTTP status.
    #[error("HTTP {} {status_text}", .status.as_u16())]
    Http {
        /// Response status
        status: http::StatusCode,
        /// Canonical reason phrase
        status_text: String,
        /// Error body: JSON if it parsed, else the text, else `null`
        body: Value,
    },

    /// The response body did not match the expected schema.
    #[error("Response failed validation with {} issue(s)", .issues.len())]
    InvalidResponse {
        /// Validation issues, sorted by path
        issues: Vec<Issue>,
        /// The decoded JSON body
        raw: Value,
    },

    /// The API answered 2xx but reported errors in the payload.
    #[error("API reported {} error(s)", .errors.len())]
    Api {
        /// Raw error entries from the response envelope
        errors: Vec<Value>,
    },

    /// Required configuration is missing.
    #[error("{message}")]
    Config {
        /// Human-readable description
        message: String,
        /// Name of the offending option
        field: Option<&'static str>,
    },

    /// The per-attempt deadline elapsed.
    #[error("{message}")]
    Timeout {
        /// Human-readable description
        message: String,
        /// Configured deadline in milliseconds
        timeout_ms: u64,
    },

    /// The caller cancelled the request.
    #[error("{message}")]
    Aborted {
        /// Human-readable description
        message: String,
    },
}

impl BoldError {
    /// Creates a `network` error without an underlying cause.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a `network` error wrapping an underlying cause.
    pub fn network_with_cause(
        message: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Creates a `config` error naming the offending field.
    pub fn config(message: impl Into<String>, field: &'static str) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field),
        }
    }

    /// Creates a `timeout` error for the given deadline.
    #[must_use]
    pub fn timeout(timeout: Duration) -> Self {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        Self::Timeout {
            message: format!("Request timed out after {timeout_ms}ms"),
            timeout_ms,
        }
    }

    /// Creates an `aborted` error.
    #[must_use]
    pub fn aborted() -> Self {
        Self::Aborted {
            message: "Request was cancelled".to_string(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Http { .. } => ErrorKind::Http,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Api { .. } => ErrorKind::ApiError,
            Self::Config { .. } => ErrorKind::Config,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Aborted { .. } => ErrorKind::Aborted,
        }
    }

    /// Renders the error as a JSON object tagged with its `kind`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let kind = self.kind().as_str();
        match self {
            Self::Network { message, cause } => json!({
                "kind": kind,
                "message": message,
                "cause": cause.as_ref().map(ToString::to_string),
            }),
            Self::Http {
                status,
                status_text,
                body,
            } => json!({
                "kind": kind,
                "status": status.as_u16(),
                "status_text": status_text,
                "body": body,
            }),
            Self::InvalidResponse { issues, raw } => json!({
                "kind": kind,
                "issues": issues,
                "raw": raw,
            }),
            Self::Api { errors } => json!({ "kind": kind, "errors": errors }),
            Self::Config { message, field } => json!({
                "kind": kind,
                "message": message,
                "field": field,
            }),
            Self::Timeout {
                message,
                timeout_ms,
            } => json!({
                "kind": kind,
                "message": message,
                "timeout_ms": timeout_ms,
            }),
            Self::Aborted { message } => json!({ "kind": kind, "message": message }),
        }
    }
}
