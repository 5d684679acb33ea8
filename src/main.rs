//! Critique CLI entrypoint: serves the review endpoint or requests a review.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use critique::{CritiqueConfig, OperationMode, telemetry};
use ortho_config::OrthoConfig;

use cli::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let config = load_config()?;
    telemetry::init_tracing(&config.log_filter).map_err(|error| CliError::Configuration {
        message: error.to_string(),
    })?;

    match config.operation_mode() {
        OperationMode::Serve => cli::serve::run(&config).await,
        OperationMode::Review => cli::review::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<CritiqueConfig, CliError> {
    CritiqueConfig::load().map_err(|error| CliError::Configuration {
        message: error.to_string(),
    })
}
