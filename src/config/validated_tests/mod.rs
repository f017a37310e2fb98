//! Tests for merging CLI flags and `bold.toml` into a [`ValidatedConfig`].

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Parses `bold <args...>`.
fn cli(args: &[&str]) -> Cli {
    Cli::parse_from_iter(std::iter::once("bold").chain(args.iter().copied()))
}

/// Parses an inline `bold.toml`.
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).expect("inline bold.toml must parse")
}
