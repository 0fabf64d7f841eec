//! HTTP implementation of [`SnapshotFetcher`] using reqwest.

use std::time::Duration;

use tracing::trace;

use super::{FetchError, FetchFuture, SnapshotFetcher};
use crate::snapshot::MetricsSnapshot;

/// Build the metrics endpoint URL from a base URL.
///
/// Exactly one `/` separates the base from `metrics`, whether or not the base
/// already ends with a slash.
pub fn metrics_url(base_url: &str) -> String {
    format!("{}/metrics", base_url.trim_end_matches('/'))
}

/// Fetches snapshots with `GET <base-url>/metrics`.
#[derive(Debug, Clone)]
pub struct HttpSnapshotFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpSnapshotFetcher {
    /// Creates a fetcher for the given base URL with a bounded request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pulseboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: metrics_url(base_url),
            timeout,
        })
    }

    /// The full endpoint this fetcher requests.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(self.timeout)
        } else {
            FetchError::network(format!("connection failed: {}", error))
        }
    }

    async fn fetch_once(&self) -> Result<MetricsSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        trace!(url = %self.url, bytes = body.len(), "Metrics response received");

        MetricsSnapshot::from_json(&body)
            .map_err(|e| FetchError::decode(format!("malformed metrics response: {}", e)))
    }
}

impl SnapshotFetcher for HttpSnapshotFetcher {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch_once())
    }
}
