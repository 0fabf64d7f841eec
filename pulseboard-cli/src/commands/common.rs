//! Arguments shared across CLI commands.

use std::time::Duration;

use clap::Args;
use pulseboard::config::{DashboardConfig, MAX_DURATION_SECS};

/// Connection overrides accepted by `watch` and `fetch`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Metrics service base URL (e.g., http://localhost:8080/api)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Refresh interval in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECS))]
    pub interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECS))]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Layer command-line values over an already resolved configuration.
    pub fn apply(&self, mut config: DashboardConfig) -> DashboardConfig {
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(secs) = self.interval {
            config = config.with_refresh_interval(Duration::from_secs(secs));
        }
        if let Some(secs) = self.timeout {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_leave_config_unchanged() {
        let base = DashboardConfig::new("http://a/api");
        assert_eq!(ConnectionArgs::default().apply(base.clone()), base);
    }

    #[test]
    fn test_args_override_config() {
        let args = ConnectionArgs {
            base_url: Some("http://b/api".to_string()),
            interval: Some(5),
            timeout: None,
        };
        let config = args.apply(DashboardConfig::new("http://a/api"));

        assert_eq!(config.base_url, "http://b/api");
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
