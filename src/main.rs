//! bold: command-line client for the Bold payments API
//!
//! Entry point for the bold application.

use std::process::ExitCode;

use bold_sdk::api::Bold;
use bold_sdk::config::{Cli, Command, ValidatedConfig};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return match run::init(output) {
            Ok(_) => {
                println!("Configuration template written to: {}", output.display());
                exit_code::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                exit_code::CONFIG_ERROR
            }
        };
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    run_application(&cli.command, &config)
}

/// Runs one command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(command: &Command, config: &ValidatedConfig) -> ExitCode {
    let bold = match Bold::new(config.bold_options()) {
        Ok(bold) => bold,
        Err(e) => {
            print_json_err(&e.to_json());
            return exit_code::CONFIG_ERROR;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    let result = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            run::shutdown_signal().await;
            tracing::info!("Shutdown signal received, cancelling request...");
            on_signal.cancel();
        });

        run::execute(command, &bold, cancel).await
    });

    match result {
        Ok(output) => {
            print_json(&output);
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::debug!("Command failed: {e}");
            print_json_err(&e.to_json());
            if e.is_config() {
                exit_code::CONFIG_ERROR
            } else {
                exit_code::runtime_error()
            }
        }
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

fn print_json_err(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => eprintln!("{text}"),
        Err(_) => eprintln!("{value}"),
    }
}
