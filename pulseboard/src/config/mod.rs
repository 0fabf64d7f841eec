//! Configuration.
//!
//! - [`DashboardConfig`] is what the engine needs at runtime: where the
//!   service lives, how often to refresh, how long one request may take.
//! - [`ConfigFile`] is the persisted INI file at [`config_file_path`], edited
//!   with `pulseboard config set` and read at startup.
//!
//! Precedence when resolving the effective configuration is: command line,
//! then the `PULSEBOARD_API_BASE_URL` environment variable, then the config
//! file, then the defaults below.

mod dashboard;
mod error;
mod file;
mod keys;

pub use dashboard::{
    DashboardConfig, BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_DURATION_SECS,
};
pub use error::ConfigError;
pub use file::{config_directory, config_file_path, default_log_file, ConfigFile};
pub use keys::ConfigKey;
