//! Wire model for the `/metrics` response body.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single page and its view count over the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Normalized page URL (path).
    pub url: String,

    /// Number of views in the window.
    pub view_count: u64,
}

impl PageView {
    pub fn new(url: impl Into<String>, view_count: u64) -> Self {
        Self {
            url: url.into(),
            view_count,
        }
    }
}

/// The authoritative payload retrieved from the metrics service.
///
/// Field names follow the service's camelCase JSON. The `timestamp` is
/// accepted either as an RFC 3339 string or as a number of seconds since the
/// Unix epoch (fractional seconds allowed); it is always serialized back as
/// RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Distinct users with at least one event in the trailing 5 minutes.
    pub active_users_count: u64,

    /// Most viewed pages, in the order the service delivered them.
    #[serde(default)]
    pub top_pages: Vec<PageView>,

    /// Session count per user over the trailing 5 minutes. Every count is
    /// at least one.
    #[serde(default, deserialize_with = "deserialize_session_counts")]
    pub active_sessions_by_user: BTreeMap<String, u32>,

    /// When the service computed this snapshot.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// Decode a snapshot from a raw JSON response body.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

fn deserialize_session_counts<'de, D>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let sessions = BTreeMap::<String, u32>::deserialize(deserializer)?;
    if let Some((user, _)) = sessions.iter().find(|(_, count)| **count == 0) {
        return Err(D::Error::custom(format!(
            "session count for '{}' must be positive",
            user
        )));
    }
    Ok(sessions)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    EpochSeconds(f64),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", text, e))),
        RawTimestamp::EpochSeconds(secs) => {
            if !secs.is_finite() || secs < 0.0 {
                return Err(D::Error::custom(format!("invalid epoch timestamp {}", secs)));
            }
            let whole = secs.trunc() as i64;
            let nanos = ((secs - secs.trunc()) * 1_000_000_000.0).round() as u32;
            DateTime::from_timestamp(whole, nanos.min(999_999_999))
                .ok_or_else(|| D::Error::custom(format!("epoch timestamp {} out of range", secs)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "activeUsersCount": 42,
        "topPages": [{"url": "/home", "viewCount": 10}, {"url": "/pricing", "viewCount": 4}],
        "activeSessionsByUser": {"alice": 2, "bob": 1},
        "timestamp": "2024-05-01T12:30:00Z"
    }"#;

    #[test]
    fn test_decode_full_snapshot() {
        let snapshot = MetricsSnapshot::from_json(SAMPLE.as_bytes()).unwrap();

        assert_eq!(snapshot.active_users_count, 42);
        assert_eq!(snapshot.top_pages.len(), 2);
        assert_eq!(snapshot.top_pages[0], PageView::new("/home", 10));
        assert_eq!(snapshot.active_sessions_by_user.get("alice"), Some(&2));
        assert_eq!(
            snapshot.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_top_pages_keep_delivered_order() {
        let body = r#"{"activeUsersCount": 1,
            "topPages": [{"url": "/b", "viewCount": 1}, {"url": "/a", "viewCount": 9}],
            "timestamp": "2024-05-01T12:30:00Z"}"#;
        let snapshot = MetricsSnapshot::from_json(body.as_bytes()).unwrap();

        let urls: Vec<_> = snapshot.top_pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/b", "/a"]);
    }

    #[test]
    fn test_decode_epoch_seconds_timestamp() {
        let body = r#"{"activeUsersCount": 0, "timestamp": 1714566600.5}"#;
        let snapshot = MetricsSnapshot::from_json(body.as_bytes()).unwrap();

        assert_eq!(snapshot.timestamp.timestamp(), 1_714_566_600);
        assert_eq!(snapshot.timestamp.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_decode_offset_timestamp_normalized_to_utc() {
        let body = r#"{"activeUsersCount": 0, "timestamp": "2024-05-01T14:30:00+02:00"}"#;
        let snapshot = MetricsSnapshot::from_json(body.as_bytes()).unwrap();

        assert_eq!(
            snapshot.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let body = r#"{"activeUsersCount": 3, "timestamp": "2024-05-01T12:30:00Z"}"#;
        let snapshot = MetricsSnapshot::from_json(body.as_bytes()).unwrap();

        assert!(snapshot.top_pages.is_empty());
        assert!(snapshot.active_sessions_by_user.is_empty());
    }

    #[test]
    fn test_missing_count_is_rejected() {
        let body = r#"{"topPages": [], "timestamp": "2024-05-01T12:30:00Z"}"#;
        let err = MetricsSnapshot::from_json(body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("activeUsersCount"));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let body = r#"{"activeUsersCount": -1, "timestamp": "2024-05-01T12:30:00Z"}"#;
        assert!(MetricsSnapshot::from_json(body.as_bytes()).is_err());
    }

    #[test]
    fn test_zero_session_count_is_rejected() {
        let body = r#"{"activeUsersCount": 1,
            "activeSessionsByUser": {"alice": 2, "ghost": 0},
            "timestamp": "2024-05-01T12:30:00Z"}"#;
        let err = MetricsSnapshot::from_json(body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'ghost' must be positive"));
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        let body = r#"{"activeUsersCount": 1, "timestamp": "yesterday"}"#;
        let err = MetricsSnapshot::from_json(body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let snapshot = MetricsSnapshot::from_json(SAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"activeUsersCount\":42"));
        assert!(json.contains("\"viewCount\":10"));
        assert!(json.contains("\"activeSessionsByUser\""));
    }
}
