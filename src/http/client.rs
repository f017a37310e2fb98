//! Production HTTP client implementation using reqwest.

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Production HTTP client using reqwest.
///
/// Wraps `reqwest::Client` with connection pooling and a `bold-sdk`
/// user agent. No client-level timeout is set; the executor owns deadlines.
///
/// # Example
///
/// ```no_run
/// use bold_sdk::http::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://integrations.api.bold.co/payments/payment-methods")?;
/// let response = client.request(HttpRequest::new(http::Method::GET, url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

/// User agent sent by [`ReqwestClient::new`].
pub const USER_AGENT: &str = concat!("bold-sdk/", env!("CARGO_PKG_VERSION"));

impl ReqwestClient {
    /// Creates a client that identifies itself as [`USER_AGENT`].
    ///
    /// Falls back to reqwest's defaults if the TLS backend cannot be set up
    /// with the custom configuration.
    #[must_use]
    pub fn new() -> Self {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });
        Self { inner }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Use this for proxies, custom roots or a different user agent.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a reqwest failure onto the transport error taxonomy.
pub(super) fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::InvalidUrl(error.to_string())
    } else if error.is_redirect() || error.is_decode() || error.is_body() {
        TransportError::protocol(error)
    } else {
        TransportError::connection(error)
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
