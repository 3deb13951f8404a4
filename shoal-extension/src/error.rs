//! Extension client error types

use thiserror::Error;

/// Errors that can occur while talking to the cluster
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Cluster returned {status} ({error_type}): {reason}")]
    Remote {
        status: u16,
        error_type: String,
        reason: String,
    },

    #[error("Deprecated API usage: {0}")]
    Deprecation(String),

    #[error("Request cancelled: {0}")]
    Cancelled(String),

    #[error("Transport closed: {0}")]
    Closed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtensionError {
    /// Get the error type as a string for metrics labeling
    pub fn error_type(&self) -> &'static str {
        match self {
            ExtensionError::Connection(_) => "connection",
            ExtensionError::Transport(_) => "transport",
            ExtensionError::Tls(_) => "tls",
            ExtensionError::Serialization(_) => "serialization",
            ExtensionError::Decode(_) => "decode",
            ExtensionError::Timeout(_) => "timeout",
            ExtensionError::Remote { .. } => "remote",
            ExtensionError::Deprecation(_) => "deprecation",
            ExtensionError::Cancelled(_) => "cancelled",
            ExtensionError::Closed(_) => "closed",
            ExtensionError::Config(_) => "config",
        }
    }

    /// True when the error is the cancellation outcome of an aborted request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExtensionError::Cancelled(_))
    }
}

impl From<reqwest::Error> for ExtensionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtensionError::Timeout(err.to_string())
        } else if err.is_connect() {
            ExtensionError::Connection(err.to_string())
        } else if err.is_decode() {
            ExtensionError::Decode(err.to_string())
        } else {
            ExtensionError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExtensionError {
    fn from(err: serde_json::Error) -> Self {
        ExtensionError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ExtensionError {
    fn from(err: std::io::Error) -> Self {
        ExtensionError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtensionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_labels() {
        assert_eq!(ExtensionError::Tls("x".into()).error_type(), "tls");
        assert_eq!(ExtensionError::Decode("x".into()).error_type(), "decode");
        assert_eq!(
            ExtensionError::Remote {
                status: 404,
                error_type: "index_not_found_exception".into(),
                reason: "no such index".into(),
            }
            .error_type(),
            "remote"
        );
        assert_eq!(
            ExtensionError::Cancelled("create index".into()).error_type(),
            "cancelled"
        );
    }

    #[test]
    fn test_remote_error_display() {
        let err = ExtensionError::Remote {
            status: 404,
            error_type: "index_not_found_exception".into(),
            reason: "no such index [products]".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("index_not_found_exception"));
        assert!(msg.contains("no such index [products]"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ExtensionError::Cancelled("get mapping".into()).is_cancelled());
        assert!(!ExtensionError::Timeout("30s".into()).is_cancelled());
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ExtensionError::from(parse_err);
        assert_eq!(err.error_type(), "serialization");
    }
}
