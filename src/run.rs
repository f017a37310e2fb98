//! Command execution.
//!
//! Maps each subcommand onto a [`Bold`] call and renders the result as JSON.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use bold_sdk::api::{Bold, RequestConfig};
use bold_sdk::config::{Command, ConfigError, write_default_config};
use bold_sdk::executor::{Issue, JsonSchema, Schema};
use bold_sdk::http::HttpClient;
use bold_sdk::models::AppCheckoutRequest;
use bold_sdk::time::Sleeper;
use bold_sdk::{BoldError, ErrorKind};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] BoldError),

    /// Writing the config template failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON.
    #[error("Failed to parse '{}': {source}", path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An input file does not describe a valid request.
    #[error("Invalid request in '{}': {}", path.display(), join_issues(issues))]
    InvalidInput { path: PathBuf, issues: Vec<Issue> },

    /// The webhook signature did not match.
    #[error("Webhook verification failed: {0}")]
    InvalidSignature(String),
}

impl RunError {
    /// Returns true if the user's configuration or input is at fault.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        match self {
            Self::Api(e) => matches!(e.kind(), ErrorKind::Config),
            Self::Config(_)
            | Self::ReadInput { .. }
            | Self::ParseInput { .. }
            | Self::InvalidInput { .. } => true,
            Self::InvalidSignature(_) => false,
        }
    }

    /// Renders the error for stderr.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Api(e) => e.to_json(),
            Self::InvalidInput { path, issues } => json!({
                "kind": "invalid_input",
                "path": path,
                "issues": issues,
            }),
            Self::InvalidSignature(reason) => json!({
                "kind": "invalid_signature",
                "valid": false,
                "error": reason,
            }),
            Self::Config(_) | Self::ReadInput { .. } | Self::ParseInput { .. } => json!({
                "kind": "config",
                "message": self.to_string(),
            }),
        }
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Writes the config template to `output`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn init(output: &Path) -> Result<Value, RunError> {
    write_default_config(output)?;
    Ok(json!({ "written": output }))
}

/// Runs `command` against `bold`, stopping early once `cancel` fires.
///
/// # Errors
///
/// Returns the API error, an input error, or [`RunError::InvalidSignature`]
/// when `verify` rejects the signature.
pub async fn execute<H, S>(
    command: &Command,
    bold: &Bold<H, S>,
    cancel: CancellationToken,
) -> Result<Value, RunError>
where
    H: HttpClient,
    S: Sleeper,
{
    let config = RequestConfig::new().with_cancellation(cancel);

    match command {
        Command::Init { output } => init(output),
        Command::Token => render(bold.oauth().get_token(config).await?),
        Command::Methods => render(bold.payments().methods(config).await?),
        Command::Terminals => render(bold.terminals().list(config).await?),
        Command::Status { sale_id } => render(bold.payments().status(sale_id, config).await?),
        Command::Notifications {
            payment_id,
            external_reference,
        } => render(
            bold.webhooks()
                .notifications(payment_id, *external_reference, config)
                .await?,
        ),
        Command::Checkout {
            input,
            idempotency_key,
        } => {
            let request = read_checkout(input)?;
            let config = match idempotency_key {
                Some(key) => config.with_idempotency_key(key.clone()),
                None => config,
            };
            tracing::debug!(reference = %request.reference, "Starting app checkout");
            render(bold.payments().create(&request, config).await?)
        }
        Command::Sign { payload } => {
            let body = read_input(payload)?;
            Ok(json!({ "signature": bold.webhooks().generate_signature(body) }))
        }
        Command::Verify { payload, signature } => {
            let body = read_input(payload)?;
            let verification = bold.webhooks().verify(body, signature);
            if verification.valid {
                Ok(json!({ "valid": true }))
            } else {
                Err(RunError::InvalidSignature(
                    verification.error.unwrap_or_default(),
                ))
            }
        }
    }
}

fn render<T: Serialize>(value: T) -> Result<Value, RunError> {
    serde_json::to_value(value)
        .map_err(|e| BoldError::network_with_cause("Failed to render response", e).into())
}

fn read_input(path: &Path) -> Result<Vec<u8>, RunError> {
    std::fs::read(path).map_err(|source| RunError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

fn read_checkout(path: &Path) -> Result<AppCheckoutRequest, RunError> {
    let bytes = read_input(path)?;
    let raw: Value = serde_json::from_slice(&bytes).map_err(|source| RunError::ParseInput {
        path: path.to_path_buf(),
        source,
    })?;

    JsonSchema::<AppCheckoutRequest>::new()
        .validate(&raw)
        .map_err(|issues| RunError::InvalidInput {
            path: path.to_path_buf(),
            issues,
        })
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Resolves only on a signal; if a handler cannot be installed that
/// source is ignored.
#[cfg(not(tarpaulin_include))]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
