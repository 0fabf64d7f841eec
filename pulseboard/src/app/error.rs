//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::fetcher::FetchError;

/// Errors that can occur while starting the dashboard.
#[derive(Debug)]
pub enum AppError {
    /// The configuration failed validation.
    Config(ConfigError),

    /// The HTTP fetcher could not be built.
    Fetcher(FetchError),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),

    /// `start` was called outside a Tokio runtime.
    NoRuntime,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Fetcher(e) => write!(f, "Failed to create metrics fetcher: {}", e),
            AppError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
            AppError::NoRuntime => {
                write!(f, "No Tokio runtime available; use start_sync() instead")
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Fetcher(e) => Some(e),
            AppError::RuntimeCreation(_) | AppError::NoRuntime => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::Fetcher(e)
    }
}
