//! Runtime configuration for the refresh engine.

use std::time::Duration;

use super::error::ConfigError;
use crate::fetcher::metrics_url;

/// Service base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default refresh cadence in seconds.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Default bound on a single request in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upper bound in seconds for the refresh interval and request timeout (one day).
pub const MAX_DURATION_SECS: u64 = 86_400;

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV_VAR: &str = "PULSEBOARD_API_BASE_URL";

/// Settings the engine needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the metrics service; `/metrics` is appended.
    pub base_url: String,

    /// Time between scheduled refreshes.
    pub refresh_interval: Duration,

    /// Upper bound on a single fetch attempt.
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl DashboardConfig {
    /// Create a configuration for the given base URL with default timings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Apply the base URL environment override using the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    /// Apply the base URL environment override using a custom lookup.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// The full metrics endpoint.
    pub fn metrics_url(&self) -> String {
        metrics_url(&self.base_url)
    }

    /// Check the configuration before starting the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        check_duration("refresh interval", self.refresh_interval)?;
        check_duration("request timeout", self.request_timeout)?;

        Ok(())
    }
}

fn check_duration(name: &'static str, value: Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::ZeroDuration(name));
    }
    if value > Duration::from_secs(MAX_DURATION_SECS) {
        return Err(ConfigError::DurationTooLong {
            name,
            max_secs: MAX_DURATION_SECS,
        });
    }
    Ok(())
}
