//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Every
//! component surfaces one of these variants; HTTP-derived failures carry the
//! observed status code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing API credential: {0}")]
    MissingCredential(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected (status {0})")]
    Auth(u16),

    #[error("server error (status {0})")]
    Server(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// Transient failures eligible for retry. Auth and malformed-request
    /// errors are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout | Error::Server(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::Network("connection reset".to_string()).is_retryable());
        assert!(Error::Timeout.is_retryable());
        assert!(Error::Server(503).is_retryable());

        assert!(!Error::Auth(401).is_retryable());
        assert!(!Error::InvalidRequest("empty model".to_string()).is_retryable());
        assert!(!Error::MissingCredential("no key".to_string()).is_retryable());
        assert!(!Error::Decode("missing field".to_string()).is_retryable());
    }

    #[test]
    fn test_error_messages_include_status() {
        assert_eq!(
            Error::Auth(403).to_string(),
            "authentication rejected (status 403)"
        );
        assert_eq!(Error::Server(500).to_string(), "server error (status 500)");
    }
}
