//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::api::{BaseUrls, BoldOptions, Environment};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
pub struct ValidatedConfig {
    /// Identity key; empty for commands that do not call the API with it
    pub identity_key: String,

    /// Webhook secret key
    pub secret_key: String,

    /// OAuth client id
    pub client_id: Option<String>,

    /// OAuth client secret
    pub client_secret: Option<String>,

    /// Target environment
    pub environment: Environment,

    /// Per-attempt timeout
    pub timeout: Duration,

    /// Retries after the first attempt
    pub retries: u32,

    /// Base retry delay
    pub retry_delay: Duration,

    /// Service URLs
    pub base_urls: BaseUrls,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("base_urls", &self.base_urls)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ environment: {}, timeout: {}ms, retry: {}x/{}ms, integrations: {}, \
             payments: {}, oauth: {}, oauth_credentials: {} }}",
            self.environment,
            self.timeout.as_millis(),
            self.retries,
            self.retry_delay.as_millis(),
            self.base_urls.integrations,
            self.base_urls.payments,
            self.base_urls.oauth,
            self.client_id.is_some() && self.client_secret.is_some(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command needs the identity key and none is given
    /// - The environment name is unknown
    /// - A duration is zero
    /// - A base URL override is not an http(s) URL
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let credentials = toml.map(|t| &t.credentials);

        let identity_key = cli
            .identity_key
            .clone()
            .or_else(|| credentials.and_then(|c| c.identity_key.clone()))
            .unwrap_or_default();
        if identity_key.is_empty() && cli.command.requires_identity_key() {
            return Err(ConfigError::missing(
                field::IDENTITY_KEY,
                "Use --identity-key or set credentials.identity_key in config file",
            ));
        }

        let secret_key = cli
            .secret_key
            .clone()
            .or_else(|| credentials.and_then(|c| c.secret_key.clone()))
            .unwrap_or_default();
        let client_id = cli
            .client_id
            .clone()
            .or_else(|| credentials.and_then(|c| c.client_id.clone()));
        let client_secret = cli
            .client_secret
            .clone()
            .or_else(|| credentials.and_then(|c| c.client_secret.clone()));

        let environment = Self::resolve_environment(cli, toml)?;
        let (timeout, retries, retry_delay) = Self::resolve_timing(cli, toml)?;
        let base_urls = Self::resolve_base_urls(environment, toml)?;

        Ok(Self {
            identity_key,
            secret_key,
            client_id,
            client_secret,
            environment,
            timeout,
            retries,
            retry_delay,
            base_urls,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Reads `cli.config` if set; otherwise the platform config file if it
    /// exists; otherwise uses CLI values and defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Some(TomlConfig::load(&path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Converts the configuration into client options.
    #[must_use]
    pub fn bold_options(&self) -> BoldOptions {
        BoldOptions {
            identity_key: self.identity_key.clone(),
            secret_key: self.secret_key.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            environment: self.environment,
            timeout: self.timeout,
            retries: self.retries,
            retry_delay: self.retry_delay,
            base_urls: Some(self.base_urls.clone()),
        }
    }

    fn resolve_environment(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Environment, ConfigError> {
        if let Some(environment) = cli.environment {
            return Ok(environment.into());
        }

        match toml.and_then(|t| t.client.environment.as_deref()) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidEnvironment {
                    value: value.to_string(),
                }),
            None => Ok(Environment::default()),
        }
    }

    fn resolve_timing(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<(Duration, u32, Duration), ConfigError> {
        let client = toml.map(|t| &t.client);

        // Priority: CLI explicit > TOML > default
        let timeout_ms = cli
            .timeout_ms
            .or_else(|| client.and_then(|c| c.timeout_ms))
            .unwrap_or(defaults::TIMEOUT_MS);

        let retries = cli
            .retries
            .or_else(|| client.and_then(|c| c.retries))
            .unwrap_or(defaults::RETRIES);

        let retry_delay_ms = cli
            .retry_delay_ms
            .or_else(|| client.and_then(|c| c.retry_delay_ms))
            .unwrap_or(defaults::RETRY_DELAY_MS);

        if timeout_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }

        if retry_delay_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "retry_delay_ms",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok((
            Duration::from_millis(timeout_ms),
            retries,
            Duration::from_millis(retry_delay_ms),
        ))
    }

    fn resolve_base_urls(
        environment: Environment,
        toml: Option<&TomlConfig>,
    ) -> Result<BaseUrls, ConfigError> {
        let mut urls = BaseUrls::for_environment(environment);
        let Some(overrides) = toml.map(|t| &t.base_urls) else {
            return Ok(urls);
        };

        if let Some(ref url) = overrides.oauth {
            urls.oauth = parse_base_url("base_urls.oauth", url)?;
        }
        if let Some(ref url) = overrides.integrations {
            urls.integrations = parse_base_url("base_urls.integrations", url)?;
        }
        if let Some(ref url) = overrides.payments {
            urls.payments = parse_base_url("base_urls.payments", url)?;
        }

        Ok(urls)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Returns the config path `load` would fall back to.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    defaults::config_path()
}

fn parse_base_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        url: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_string()));
    }
    Ok(url)
}
