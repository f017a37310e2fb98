//! Wire-level request and response values plus the [`HttpClient`] seam.

use super::TransportError;

/// A fully built request, ready for a transport.
///
/// The executor produces one per attempt from a
/// [`RequestSpec`](crate::executor::RequestSpec); retries resend an
/// identical value.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    pub url: url::Url,
    pub headers: http::HeaderMap,
    /// Serialized body (JSON or form-encoded), if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A response with its body fully buffered.
///
/// Bold responses are small JSON documents, so nothing is streamed.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Builds an `application/json` response; used by scripted transports.
    #[must_use]
    pub fn json(status: http::StatusCode, body: &serde_json::Value) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Self::new(status, headers, body.to_string().into_bytes())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Canonical reason phrase (`"Not Found"`), empty for unregistered codes.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// A transport able to perform one HTTP exchange.
///
/// [`ReqwestClient`](super::ReqwestClient) is the production implementation;
/// tests plug in scripted clients. Implementations perform exactly one
/// exchange per call: retries, deadlines and decoding belong to the
/// executor. Cancellation is expressed by dropping the returned future.
///
/// # Example
///
/// ```ignore
/// use bold_sdk::http::{HttpClient, HttpRequest, HttpResponse, TransportError};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained;
    /// non-2xx statuses are not errors at this level.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).request(req)
    }
}
