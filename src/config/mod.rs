//! Configuration layer for the `bold` command-line tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - `--config`, or the platform config file if present
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The identity key has no default. It is required by the commands that
//! call the API with it (`methods`, `terminals`, `status`, `notifications`,
//! `checkout`); `token`, `sign` and `verify` run without it.
//!
//! Base URLs can only be overridden from the config file; each unset entry
//! follows the selected environment.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, EnvironmentArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, write_default_config};
