//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials
    #[serde(default)]
    pub credentials: CredentialsSection,

    /// Request behavior
    #[serde(default)]
    pub client: ClientSection,

    /// Base URL overrides
    #[serde(default)]
    pub base_urls: BaseUrlsSection,
}

/// Credentials section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Identity key sent as `x-api-key`
    pub identity_key: Option<String>,

    /// Webhook secret key
    pub secret_key: Option<String>,

    /// OAuth client id
    pub client_id: Option<String>,

    /// OAuth client secret
    pub client_secret: Option<String>,
}

/// Client behavior section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// "sandbox" or "production"
    pub environment: Option<String>,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,

    /// Retries after the first attempt
    pub retries: Option<u32>,

    /// Base retry delay in milliseconds
    pub retry_delay_ms: Option<u64>,
}

/// Base URL overrides; unset entries follow the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseUrlsSection {
    pub oauth: Option<String>,
    pub integrations: Option<String>,
    pub payments: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# bold configuration file
# Values passed on the command line override the ones below.

[credentials]
# Identity key, sent as "Authorization: x-api-key <key>" (required for API commands)
# identity_key = "your-identity-key"

# Secret key used to sign webhooks (leave empty in sandbox)
# secret_key = ""

# OAuth client credentials (only needed for `bold token`)
# client_id = ""
# client_secret = ""

[client]
# "sandbox" or "production" (default: sandbox)
environment = "sandbox"

# Per-attempt timeout in milliseconds (default: 30000)
# timeout_ms = 30000

# Retries after the first attempt (default: 0)
# Pass an idempotency key before retrying checkouts.
# retries = 0

# Base retry delay in milliseconds, doubled on each retry (default: 1000)
# retry_delay_ms = 1000

[base_urls]
# Override the service URLs, e.g. to point at a local mock
# oauth = "https://api.sandbox.bold.co"
# integrations = "https://integrations.api.bold.co"
# payments = "https://payments.api.bold.co"
"#
    .to_string()
}
