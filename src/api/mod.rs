//! High-level client for the Bold API.
//!
//! [`Bold`] wires credentials, base URLs and call defaults into the
//! [`Executor`] and exposes one accessor per resource:
//!
//! - [`Bold::oauth`]: client-credentials tokens
//! - [`Bold::payments`]: app checkout, payment methods, transaction status
//! - [`Bold::terminals`]: bound dataphones
//! - [`Bold::webhooks`]: signature checks, payload parsing, notification lookup
//!
//! # Example
//!
//! ```no_run
//! use bold_sdk::api::{Bold, BoldOptions, RequestConfig};
//!
//! # async fn example() -> Result<(), bold_sdk::BoldError> {
//! let bold = Bold::new(BoldOptions::new("identity-key"))?;
//! let methods = bold.payments().methods(RequestConfig::new()).await?;
//! for method in methods.payload.payment_methods {
//!     println!("{:?} enabled={}", method.name, method.enabled);
//! }
//! # Ok(())
//! # }
//! ```

mod oauth;
mod options;
mod payments;
mod terminals;
mod webhooks;

#[cfg(test)]
mod mod_tests;
#[cfg(test)]
mod webhooks_tests;

use std::fmt;

use http::header::{AUTHORIZATION, HeaderValue};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use url::Url;
use validator::Validate;

use crate::BoldError;
use crate::executor::{Executor, JsonSchema, RequestSpec};
use crate::http::{HttpClient, ReqwestClient};
use crate::models::ApiEnvelope;
use crate::time::{Sleeper, TokioSleeper};

pub use oauth::OAuth;
pub use options::{BaseUrls, BoldOptions, Environment, RequestConfig};
pub use payments::Payments;
pub use terminals::Terminals;
pub use webhooks::Webhooks;

use options::CallDefaults;

/// Bold API client.
///
/// Cheap to share behind an `Arc`; every call builds its own request state,
/// so concurrent calls do not interfere.
///
/// # Type Parameters
///
/// - `H`: The HTTP transport (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
pub struct Bold<H = ReqwestClient, S = TokioSleeper> {
    executor: Executor<H, S>,
    auth_headers: HeaderMap,
    secret_key: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    base_urls: BaseUrls,
    defaults: CallDefaults,
}

impl<H, S> fmt::Debug for Bold<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bold")
            .field("base_urls", &self.base_urls)
            .field("client_id", &self.client_id)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Bold<ReqwestClient, TokioSleeper> {
    /// Creates a client over the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns a `config` error if the options are invalid.
    pub fn new(options: BoldOptions) -> Result<Self, BoldError> {
        Self::with_client(options, ReqwestClient::new())
    }
}

impl<H> Bold<H, TokioSleeper> {
    /// Creates a client over any transport.
    ///
    /// # Errors
    ///
    /// Returns a `config` error if:
    /// - the identity key cannot be sent as a header value
    /// - the timeout or retry delay is zero
    pub fn with_client(options: BoldOptions, client: H) -> Result<Self, BoldError> {
        let authorization = HeaderValue::from_str(&format!("x-api-key {}", options.identity_key))
            .map_err(|_| {
                BoldError::config(
                    "identity_key contains characters not allowed in a header",
                    "identity_key",
                )
            })?;
        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(AUTHORIZATION, authorization);

        options::check_timeout(options.timeout)?;
        options::retry_policy(options.retries, options.retry_delay)?;

        let base_urls = options.resolved_base_urls();
        tracing::debug!(
            environment = %options.environment,
            oauth = %base_urls.oauth,
            integrations = %base_urls.integrations,
            payments = %base_urls.payments,
            "Bold client configured"
        );

        Ok(Self {
            executor: Executor::new(client),
            auth_headers,
            secret_key: options.secret_key,
            client_id: options.client_id,
            client_secret: options.client_secret,
            base_urls,
            defaults: CallDefaults {
                timeout: options.timeout,
                retries: options.retries,
                retry_delay: options.retry_delay,
            },
        })
    }
}

impl<H, S> Bold<H, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Bold<H, S2> {
        Bold {
            executor: self.executor.with_sleeper(sleeper),
            auth_headers: self.auth_headers,
            secret_key: self.secret_key,
            client_id: self.client_id,
            client_secret: self.client_secret,
            base_urls: self.base_urls,
            defaults: self.defaults,
        }
    }

    /// Base URLs in use.
    #[must_use]
    pub const fn base_urls(&self) -> &BaseUrls {
        &self.base_urls
    }

    /// OAuth token resource.
    #[must_use]
    pub const fn oauth(&self) -> OAuth<'_, H, S> {
        OAuth::new(self)
    }

    /// Payments resource.
    #[must_use]
    pub const fn payments(&self) -> Payments<'_, H, S> {
        Payments::new(self)
    }

    /// Terminals resource.
    #[must_use]
    pub const fn terminals(&self) -> Terminals<'_, H, S> {
        Terminals::new(self)
    }

    /// Webhooks resource.
    #[must_use]
    pub const fn webhooks(&self) -> Webhooks<'_, H, S> {
        Webhooks::new(self)
    }

    /// Builds an authenticated spec for `url`, with `config` applied.
    fn authorized<T>(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<RequestSpec<JsonSchema<T>>, BoldError> {
        let spec = RequestSpec::new(method, url, JsonSchema::new()).with_headers(&self.auth_headers);
        config.apply(spec, self.defaults)
    }
}

impl<H: HttpClient, S: Sleeper> Bold<H, S> {
    async fn call<T>(&self, spec: RequestSpec<JsonSchema<T>>) -> Result<T, BoldError>
    where
        T: DeserializeOwned + Validate,
    {
        self.executor.execute(spec).await
    }

    /// Like [`Self::call`], but reports a non-empty `errors` array as
    /// `api_error`.
    async fn call_enveloped<T>(&self, spec: RequestSpec<JsonSchema<T>>) -> Result<T, BoldError>
    where
        T: DeserializeOwned + Validate + ApiEnvelope,
    {
        let response = self.call(spec).await?;
        if response.has_api_errors() {
            return Err(BoldError::Api {
                errors: response.errors().to_vec(),
            });
        }
        Ok(response)
    }
}

/// Appends path segments to `base`, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, BoldError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| BoldError::config(format!("base URL '{base}' cannot carry a path"), "base_urls"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
