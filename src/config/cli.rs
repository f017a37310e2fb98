//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::Environment;

/// bold: command-line client for the Bold payments API
///
/// Requests tokens, lists payment methods and terminals, starts app
/// checkouts, looks up transactions and signs or verifies webhooks.
#[derive(Debug, Parser)]
#[command(name = "bold")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Identity key sent as `x-api-key` (required for API commands)
    #[arg(long = "identity-key", global = true)]
    pub identity_key: Option<String>,

    /// Secret key used to sign webhooks (empty in sandbox)
    #[arg(long = "secret-key", global = true)]
    pub secret_key: Option<String>,

    /// OAuth client id
    #[arg(long = "client-id", global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long = "client-secret", global = true)]
    pub client_secret: Option<String>,

    /// Target environment
    #[arg(long, value_enum, global = true)]
    pub environment: Option<EnvironmentArg>,

    /// Per-attempt timeout in milliseconds
    #[arg(long = "timeout-ms", global = true)]
    pub timeout_ms: Option<u64>,

    /// Number of retries after the first attempt
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Base retry delay in milliseconds (doubles on each retry)
    #[arg(long = "retry-delay-ms", global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for bold
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "bold.toml")]
        output: PathBuf,
    },

    /// Request an OAuth access token (client credentials)
    Token,

    /// List the payment methods enabled for the merchant
    Methods,

    /// List the terminals bound to the merchant
    Terminals,

    /// Show the voucher (status) of a sale
    Status {
        /// Sale identifier
        sale_id: String,
    },

    /// Fetch the webhook notifications recorded for a payment
    Notifications {
        /// Payment id (or merchant reference with --external-reference)
        payment_id: String,

        /// Treat the id as the merchant's own reference
        #[arg(long = "external-reference")]
        external_reference: bool,
    },

    /// Start an app checkout from a JSON request file
    Checkout {
        /// JSON file with the checkout request
        #[arg(long)]
        input: PathBuf,

        /// Idempotency key for safe retries
        #[arg(long = "idempotency-key")]
        idempotency_key: Option<String>,
    },

    /// Print the webhook signature of a payload file
    Sign {
        /// File holding the raw webhook body
        #[arg(long)]
        payload: PathBuf,
    },

    /// Verify a webhook signature against a payload file
    Verify {
        /// File holding the raw webhook body
        #[arg(long)]
        payload: PathBuf,

        /// Value of the x-bold-signature header
        #[arg(long)]
        signature: String,
    },
}

impl Command {
    /// Returns true if the command calls the Bold API with the identity key.
    #[must_use]
    pub const fn requires_identity_key(&self) -> bool {
        matches!(
            self,
            Self::Methods
                | Self::Terminals
                | Self::Status { .. }
                | Self::Notifications { .. }
                | Self::Checkout { .. }
        )
    }
}

/// Environment argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    /// Sandbox (test) environment
    Sandbox,
    /// Production environment
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Sandbox => Self::Sandbox,
            EnvironmentArg::Production => Self::Production,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
