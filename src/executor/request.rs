//! Description of one logical API call.

use std::time::Duration;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::RetryPolicy;
use crate::BoldError;
use crate::http::HttpRequest;

/// Header carrying the caller's idempotency key.
pub const IDEMPOTENCY_KEY: &str = "idempotency-key";

/// How the request body is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    /// `application/json`
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
}

impl ContentKind {
    /// Returns the MIME type sent in `Content-Type`.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Form => "application/x-www-form-urlencoded",
        }
    }
}

/// Request payload before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Arbitrary JSON value.
    Json(Value),
    /// Ordered key/value pairs, URL-encoded on send.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Builds a form body from key/value pairs.
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns how this body is encoded.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Json(_) => ContentKind::Json,
            Self::Form(_) => ContentKind::Form,
        }
    }

    /// Serializes the body to bytes.
    ///
    /// # Errors
    ///
    /// Returns the serde error if a JSON value cannot be written.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Json(value) => serde_json::to_vec(value),
            Self::Form(pairs) => Ok(url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish()
                .into_bytes()),
        }
    }
}

/// Everything the executor needs to perform one logical call.
///
/// Built fresh for each call; attempt counters live in the executor and
/// never outlive the call.
#[derive(Debug, Clone)]
pub struct RequestSpec<S> {
    /// Fully formed target URL.
    pub url: Url,
    /// HTTP method.
    pub method: Method,
    /// Caller headers; these override the defaults except `Idempotency-Key`.
    pub headers: HeaderMap,
    /// Optional payload.
    pub body: Option<RequestBody>,
    /// Validator for the response body.
    pub schema: S,
    /// Deadline for each attempt.
    pub timeout: Duration,
    /// Caller-owned cancellation token.
    pub cancellation: Option<CancellationToken>,
    /// Retry budget and backoff.
    pub retry: RetryPolicy,
    /// Optional idempotency key.
    pub idempotency_key: Option<String>,
}

impl<S> RequestSpec<S> {
    /// Default per-attempt deadline (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a spec with default timeout and retry policy.
    #[must_use]
    pub fn new(method: Method, url: Url, schema: S) -> Self {
        Self {
            url,
            method,
            headers: HeaderMap::new(),
            body: None,
            schema,
            timeout: Self::DEFAULT_TIMEOUT,
            cancellation: None,
            retry: RetryPolicy::default(),
            idempotency_key: None,
        }
    }

    /// Creates a GET spec.
    #[must_use]
    pub fn get(url: Url, schema: S) -> Self {
        Self::new(Method::GET, url, schema)
    }

    /// Adds caller headers, replacing values with the same name.
    #[must_use]
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            self.headers.insert(name, value.clone());
        }
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Sets a form body.
    #[must_use]
    pub fn with_form_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the per-attempt deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the caller's cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the idempotency key.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Content kind of the body; JSON when there is no body.
    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        self.body.as_ref().map_or(ContentKind::Json, RequestBody::kind)
    }

    /// Serializes the spec into the request sent on every attempt.
    ///
    /// # Errors
    ///
    /// - `config` if the idempotency key is not a valid header value
    /// - `network` if the body cannot be serialized
    pub fn to_http_request(&self) -> Result<HttpRequest, BoldError> {
        let mut request = HttpRequest::new(self.method.clone(), self.url.clone())
            .with_header(
                CONTENT_TYPE,
                HeaderValue::from_static(self.content_kind().mime()),
            )
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            request = request.with_header(name.clone(), value.clone());
        }

        if let Some(key) = &self.idempotency_key {
            let value = HeaderValue::from_str(key).map_err(|_| {
                BoldError::config(
                    "Idempotency key is not a valid header value",
                    "idempotency_key",
                )
            })?;
            request = request.with_header(HeaderName::from_static(IDEMPOTENCY_KEY), value);
        }

        if let Some(body) = &self.body {
            let bytes = body
                .encode()
                .map_err(|e| BoldError::network_with_cause("Failed to serialize request body", e))?;
            request = request.with_body(bytes);
        }

        Ok(request)
    }
}
