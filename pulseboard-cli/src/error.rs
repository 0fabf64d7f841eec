//! CLI error type.

use thiserror::Error;

use pulseboard::app::AppError;
use pulseboard::config::ConfigError;
use pulseboard::fetcher::FetchError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Failed to fetch metrics: {0}")]
    Fetch(#[from] FetchError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::ConfigFile(_) => 2,
            CliError::Fetch(_) => 3,
            _ => 1,
        }
    }
}
