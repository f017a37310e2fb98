//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Why `bold.toml` or the command line could not produce a usable client
/// configuration.
///
/// The binary maps every variant to exit code 1.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` (or the default location) names an unreadable file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `bold.toml` is not valid TOML or has unknown keys.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `bold init` could not write the template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A credential is absent from both the flags and the file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        field: &'static str,
        /// Which flag or `[client]` key supplies it.
        hint: &'static str,
    },

    /// A `[base_urls]` override is not an absolute http(s) URL.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        field: &'static str,
        url: String,
        reason: String,
    },

    /// `timeout_ms` or `retry_delay_ms` resolved to zero.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        field: &'static str,
        reason: String,
    },

    /// `environment` is neither `sandbox` nor `production`.
    #[error("Invalid environment '{value}': expected sandbox or production")]
    InvalidEnvironment { value: String },
}

/// Field names reported by [`ConfigError::MissingRequired`].
pub mod field {
    /// The identity key sent as `x-api-key`.
    pub const IDENTITY_KEY: &str = "identity_key";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
