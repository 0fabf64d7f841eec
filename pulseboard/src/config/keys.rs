//! Addressable configuration keys for `config get` / `config set`.

use std::path::PathBuf;
use std::str::FromStr;

use super::error::ConfigError;
use super::file::{parse_seconds, ConfigFile};
use super::DashboardConfig;
use crate::logging::LOG_LEVELS;

/// A `section.key` entry of [`ConfigFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiBaseUrl,
    ApiTimeout,
    RefreshInterval,
    LoggingFile,
    LoggingLevel,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ApiBaseUrl,
            ConfigKey::ApiTimeout,
            ConfigKey::RefreshInterval,
            ConfigKey::LoggingFile,
            ConfigKey::LoggingLevel,
        ]
    }

    /// Fully qualified name, e.g. `api.base_url`.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ApiBaseUrl => "api.base_url",
            ConfigKey::ApiTimeout => "api.timeout",
            ConfigKey::RefreshInterval => "refresh.interval",
            ConfigKey::LoggingFile => "logging.file",
            ConfigKey::LoggingLevel => "logging.level",
        }
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ApiBaseUrl | ConfigKey::ApiTimeout => "api",
            ConfigKey::RefreshInterval => "refresh",
            ConfigKey::LoggingFile | ConfigKey::LoggingLevel => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ApiBaseUrl => "base_url",
            ConfigKey::ApiTimeout => "timeout",
            ConfigKey::RefreshInterval => "interval",
            ConfigKey::LoggingFile => "file",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Current value rendered as it appears in the file.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ApiBaseUrl => config.api.base_url.clone(),
            ConfigKey::ApiTimeout => config.api.timeout.to_string(),
            ConfigKey::RefreshInterval => config.refresh.interval.to_string(),
            ConfigKey::LoggingFile => config.logging.file.display().to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validate and store a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ApiBaseUrl => {
                DashboardConfig::new(value).validate()?;
                config.api.base_url = value.to_string();
            }
            ConfigKey::ApiTimeout => config.api.timeout = parse_seconds(self.name(), value)?,
            ConfigKey::RefreshInterval => {
                config.refresh.interval = parse_seconds(self.name(), value)?
            }
            ConfigKey::LoggingFile => {
                if value.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: self.name().to_string(),
                        value: value.to_string(),
                        reason: "path must not be empty".to_string(),
                    });
                }
                config.logging.file = PathBuf::from(value);
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(ConfigError::InvalidValue {
                        key: self.name().to_string(),
                        value: value.to_string(),
                        reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
                    });
                }
                config.logging.level = level;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
