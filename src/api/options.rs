//! Client construction options and per-call overrides.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::BoldError;
use crate::executor::{RequestSpec, RetryPolicy};

/// Bold environment, selecting the OAuth host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Returns the lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sandbox" | "test" => Ok(Self::Sandbox),
            "production" | "prod" | "live" => Ok(Self::Production),
            _ => Err(format!(
                "unknown environment '{s}': expected sandbox or production"
            )),
        }
    }
}

/// Base URLs of the three Bold services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    /// OAuth token service.
    pub oauth: Url,
    /// Integrations API (checkout, methods, terminals, notifications).
    pub integrations: Url,
    /// Payments API (vouchers).
    pub payments: Url,
}

impl BaseUrls {
    const OAUTH_SANDBOX: &str = "https://api.sandbox.bold.co";
    const OAUTH_PRODUCTION: &str = "https://api.bold.co";
    const INTEGRATIONS: &str = "https://integrations.api.bold.co";
    const PAYMENTS: &str = "https://payments.api.bold.co";

    /// Returns the published URLs for `environment`.
    ///
    /// # Panics
    ///
    /// Never: the built-in URLs are valid.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        let oauth = match environment {
            Environment::Sandbox => Self::OAUTH_SANDBOX,
            Environment::Production => Self::OAUTH_PRODUCTION,
        };
        let parse = |s: &str| Url::parse(s).expect("built-in base URL is valid");

        Self {
            oauth: parse(oauth),
            integrations: parse(Self::INTEGRATIONS),
            payments: parse(Self::PAYMENTS),
        }
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

/// Options for building a [`Bold`](super::Bold) client.
#[derive(Clone)]
pub struct BoldOptions {
    /// Identity key sent as `Authorization: x-api-key <key>`.
    pub identity_key: String,
    /// Secret key used to sign webhooks; empty in sandbox.
    pub secret_key: String,
    /// OAuth client id.
    pub client_id: Option<String>,
    /// OAuth client secret.
    pub client_secret: Option<String>,
    pub environment: Environment,
    /// Per-attempt deadline.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub retries: u32,
    /// Base delay of the exponential backoff.
    pub retry_delay: Duration,
    /// Overrides the URLs derived from `environment`.
    pub base_urls: Option<BaseUrls>,
}

impl fmt::Debug for BoldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoldOptions")
            .field("identity_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl BoldOptions {
    /// Default per-attempt deadline (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates options with defaults for everything but the identity key.
    pub fn new(identity_key: impl Into<String>) -> Self {
        Self {
            identity_key: identity_key.into(),
            secret_key: String::new(),
            client_id: None,
            client_secret: None,
            environment: Environment::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            retries: RetryPolicy::DEFAULT_MAX_RETRIES,
            retry_delay: RetryPolicy::DEFAULT_BASE_DELAY,
            base_urls: None,
        }
    }

    #[must_use]
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = secret_key.into();
        self
    }

    #[must_use]
    pub fn with_oauth_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub const fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn with_base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = Some(base_urls);
        self
    }

    /// Base URLs in effect: the override if set, else the environment's.
    #[must_use]
    pub fn resolved_base_urls(&self) -> BaseUrls {
        self.base_urls
            .clone()
            .unwrap_or_else(|| BaseUrls::for_environment(self.environment))
    }
}

/// Client-wide call settings derived from [`BoldOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CallDefaults {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

/// Per-call overrides; unset fields fall back to the client defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub timeout: Option<Duration>,
    /// Cancels the call (including pending retries) when fired.
    pub cancellation: Option<CancellationToken>,
    pub retries: Option<u32>,
    pub retry_delay: Option<Duration>,
    /// Sent as `Idempotency-Key` so retried POSTs can be deduplicated.
    pub idempotency_key: Option<String>,
}

impl RequestConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    #[must_use]
    pub const fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay);
        self
    }

    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Applies these overrides on top of `defaults` to `spec`.
    pub(crate) fn apply<S>(
        self,
        spec: RequestSpec<S>,
        defaults: CallDefaults,
    ) -> Result<RequestSpec<S>, BoldError> {
        let timeout = self.timeout.unwrap_or(defaults.timeout);
        let retries = self.retries.unwrap_or(defaults.retries);
        let retry_delay = self.retry_delay.unwrap_or(defaults.retry_delay);
        let retry = retry_policy(retries, retry_delay)?;
        check_timeout(timeout)?;

        let mut spec = spec.with_timeout(timeout).with_retry(retry);
        if let Some(token) = self.cancellation {
            spec = spec.with_cancellation(token);
        }
        if let Some(key) = self.idempotency_key {
            spec = spec.with_idempotency_key(key);
        }
        Ok(spec)
    }
}

pub(crate) fn check_timeout(timeout: Duration) -> Result<(), BoldError> {
    if timeout.is_zero() {
        return Err(BoldError::config("timeout must be positive", "timeout"));
    }
    Ok(())
}

pub(crate) fn retry_policy(retries: u32, retry_delay: Duration) -> Result<RetryPolicy, BoldError> {
    if retry_delay.is_zero() {
        return Err(BoldError::config(
            "retry_delay must be positive",
            "retry_delay",
        ));
    }
    Ok(RetryPolicy::new()
        .with_max_retries(retries)
        .with_base_delay(retry_delay))
}
