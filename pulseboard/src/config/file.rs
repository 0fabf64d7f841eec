//! Persisted configuration file.
//!
//! Stored as INI at `~/.config/pulseboard/config.ini` (platform equivalent on
//! other systems):
//!
//! ```ini
//! [api]
//! base_url = http://localhost:8080/api
//! timeout = 10
//!
//! [refresh]
//! interval = 30
//!
//! [logging]
//! file = /home/me/.local/share/pulseboard/pulseboard.log
//! level = info
//! ```
//!
//! A missing file is not an error; every setting has a default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;

use super::dashboard::{
    DashboardConfig, DEFAULT_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    MAX_DURATION_SECS,
};
use super::error::ConfigError;
use crate::logging::{LoggingConfig, DEFAULT_LOG_LEVEL};

const CONFIG_FILE_NAME: &str = "config.ini";
const LOG_FILE_NAME: &str = "pulseboard.log";

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSection {
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// `[refresh]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSection {
    /// Refresh interval in seconds.
    pub interval: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSection {
    pub file: PathBuf,
    pub level: String,
}

/// Contents of `config.ini`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub api: ApiSection,
    pub refresh: RefreshSection,
    pub logging: LoggingSection,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            api: ApiSection {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            refresh: RefreshSection {
                interval: DEFAULT_REFRESH_INTERVAL_SECS,
            },
            logging: LoggingSection {
                file: default_log_file(),
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

impl ConfigFile {
    /// Load from [`config_file_path`]. Returns defaults if the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path. Returns defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let ini = Ini::load_from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Parse INI text. Absent keys keep their defaults.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = ini.get_from(Some("api"), "base_url") {
            config.api.base_url = url.trim().to_string();
        }
        if let Some(timeout) = ini.get_from(Some("api"), "timeout") {
            config.api.timeout = parse_seconds("api.timeout", timeout)?;
        }
        if let Some(interval) = ini.get_from(Some("refresh"), "interval") {
            config.refresh.interval = parse_seconds("refresh.interval", interval)?;
        }
        if let Some(file) = ini.get_from(Some("logging"), "file") {
            config.logging.file = PathBuf::from(file.trim());
        }
        if let Some(level) = ini.get_from(Some("logging"), "level") {
            config.logging.level = level.trim().to_string();
        }

        Ok(config)
    }

    /// Write to [`config_file_path`], creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write to an explicit path, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("api"))
            .set("base_url", self.api.base_url.as_str())
            .set("timeout", self.api.timeout.to_string());
        ini.with_section(Some("refresh"))
            .set("interval", self.refresh.interval.to_string());
        ini.with_section(Some("logging"))
            .set("file", self.logging.file.to_string_lossy().into_owned())
            .set("level", self.logging.level.as_str());
        ini
    }

    /// Engine settings described by this file, before env and CLI overrides.
    pub fn to_dashboard_config(&self) -> DashboardConfig {
        DashboardConfig::new(self.api.base_url.clone())
            .with_request_timeout(Duration::from_secs(self.api.timeout))
            .with_refresh_interval(Duration::from_secs(self.refresh.interval))
    }

    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig::new(self.logging.file.clone()).with_level(self.logging.level.clone())
    }
}

pub(super) fn parse_seconds(key: &str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }
    if secs > MAX_DURATION_SECS {
        return Err(invalid(&format!("must be at most {} seconds", MAX_DURATION_SECS)));
    }
    Ok(secs)
}

/// Directory holding `config.ini`.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pulseboard")
}

/// Full path of `config.ini`.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Default log file location.
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pulseboard")
        .join(LOG_FILE_NAME)
}
