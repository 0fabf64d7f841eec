//! Shared command setup: config file loading and logging.

use pulseboard::config::{config_file_path, ConfigFile, DashboardConfig};
use pulseboard::logging::{init_logging, LoggingGuard};
use tracing::{info, warn};

use crate::commands::common::ConnectionArgs;
use crate::error::CliError;

/// Loads configuration and installs logging for a command.
///
/// Keep the runner alive for the duration of the command; dropping it
/// flushes the log file.
pub struct CliRunner {
    config: ConfigFile,
    log_guard: Option<LoggingGuard>,
}

impl CliRunner {
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_guard = match init_logging(&config.to_logging_config()) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled: {}", e);
                None
            }
        };

        Ok(Self { config, log_guard })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn log_startup(&self, command: &str) {
        info!(
            command,
            version = pulseboard::VERSION,
            config_file = %config_file_path().display(),
            "Pulseboard starting"
        );
        if let Some(guard) = &self.log_guard {
            info!(log_file = %guard.file().display(), "Logging initialized");
        }
    }

    /// Resolve the effective engine settings.
    ///
    /// Command line beats `PULSEBOARD_API_BASE_URL`, which beats the config
    /// file, which beats the defaults.
    pub fn dashboard_config(&self, args: &ConnectionArgs) -> Result<DashboardConfig, CliError> {
        let config = args.apply(self.config.to_dashboard_config().with_env_overrides());
        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejected dashboard configuration");
            return Err(e.into());
        }
        Ok(config)
    }

    pub fn log_file(&self) -> Option<&std::path::Path> {
        self.log_guard.as_ref().map(|g| g.file())
    }
}
