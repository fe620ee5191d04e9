//! Provtrack Error Types

use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Provtrack error types
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Store errors
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Connection failed to {address}: {reason}")]
    ConnectionFailed { address: String, reason: String },

    #[error("Stored flag for key {key} is not a boolean: {value:?}")]
    InvalidFlag { key: String, value: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error is retryable
    ///
    /// Trackers never retry on their own; this is for callers deciding
    /// whether a failed operation is worth repeating.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Store(e) => e.is_io_error() || e.is_connection_dropped() || e.is_timeout(),
            Error::ConnectionFailed { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::Config("store.redis_url cannot be empty".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: store.redis_url cannot be empty"
        );

        let err = Error::InvalidFlag {
            key: "node-1".into(),
            value: "maybe".into(),
        };
        assert_eq!(
            err.to_string(),
            "Stored flag for key node-1 is not a boolean: \"maybe\""
        );

        let err = Error::ConnectionFailed {
            address: "redis://10.0.0.1:6379".into(),
            reason: "refused".into(),
        };
        assert!(err.to_string().contains("redis://10.0.0.1:6379"));
    }

    #[test]
    fn test_is_retryable() {
        let io = Error::Store(redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert!(io.is_retryable());

        let reply = Error::Store(redis::RedisError::from((ErrorKind::TypeError, "wrong type")));
        assert!(!reply.is_retryable());

        assert!(!Error::Config("bad".into()).is_retryable());
        assert!(!Error::InvalidFlag {
            key: "k".into(),
            value: "v".into()
        }
        .is_retryable());
    }
}
