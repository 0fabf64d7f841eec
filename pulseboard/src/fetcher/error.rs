//! Fetch failure taxonomy.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// What class of failure ended a fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Connection failure or timeout.
    Network,
    /// The service answered with a non-success status code.
    Protocol,
    /// The body did not match the expected snapshot shape.
    Decode,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Network => "network",
            FetchErrorKind::Protocol => "protocol",
            FetchErrorKind::Decode => "decode",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed fetch attempt.
///
/// `message` is human readable and is surfaced verbatim to the dashboard as
/// the error indicator text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Protocol, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Decode, message)
    }

    /// Timeout variant of a network error.
    pub fn timeout(timeout: Duration) -> Self {
        let limit = if timeout.subsec_nanos() == 0 {
            format!("{}s", timeout.as_secs())
        } else {
            format!("{}ms", timeout.as_millis())
        };
        Self::network(format!("request timed out after {}", limit))
    }

    /// Non-success HTTP status.
    pub fn status(code: u16) -> Self {
        Self::protocol(format!("request failed with status code {}", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let err = FetchError::status(503);
        assert_eq!(err.to_string(), "request failed with status code 503");
        assert_eq!(err.kind, FetchErrorKind::Protocol);
    }

    #[test]
    fn test_timeout_is_network() {
        let err = FetchError::timeout(Duration::from_secs(10));
        assert_eq!(err.kind, FetchErrorKind::Network);
        assert_eq!(err.message, "request timed out after 10s");

        let err = FetchError::timeout(Duration::from_millis(250));
        assert_eq!(err.message, "request timed out after 250ms");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FetchErrorKind::Decode.to_string(), "decode");
        assert_eq!(FetchErrorKind::Network.as_str(), "network");
    }
}
