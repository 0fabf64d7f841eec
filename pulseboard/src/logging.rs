//! Logging setup.
//!
//! Log output goes to a file through a non-blocking writer so that a
//! terminal dashboard can own stdout. `RUST_LOG` takes precedence over the
//! configured level when set.

use std::path::{Path, PathBuf};

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::default_log_file;

/// Level used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for the configured level.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_file())
    }
}

impl LoggingConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Build the filter: `RUST_LOG` if set, otherwise the configured level.
    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let level = self.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(LoggingError::InvalidLevel(self.level.clone()));
        }
        EnvFilter::try_new(&level).map_err(|_| LoggingError::InvalidLevel(self.level.clone()))
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Keeps the background log writer alive. Buffered lines are flushed on drop.
#[must_use = "logging stops when the guard is dropped"]
pub struct LoggingGuard {
    _worker: WorkerGuard,
    file: PathBuf,
}

impl LoggingGuard {
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = config.filter()?;

    let directory = config
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::CreateDir {
        path: directory.clone(),
        source,
    })?;

    let file_name = config
        .file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "pulseboard.log".into());

    let appender = tracing_appender::rolling::never(&directory, file_name);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let timer = OffsetTime::local_rfc_3339().unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(timer)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuard {
        _worker: worker,
        file: config.file.clone(),
    })
}
