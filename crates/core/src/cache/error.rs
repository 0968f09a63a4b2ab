use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

impl CacheError {
    /// Returns true when the error means the store itself is unreachable,
    /// as opposed to a single command being rejected.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, CacheError::ConnectionFailed(_))
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
