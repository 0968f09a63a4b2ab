use thiserror::Error;

/// Errors raised while turning raw request parameters into a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Missing parameter: {0}")]
    Missing(&'static str),
    #[error("Invalid {field}: {value}")]
    InvalidInstant { field: &'static str, value: String },
}

/// Errors that can occur when calling the upstream calendar provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Upstream network error: {0}")]
    Network(String),
    #[error("Upstream authentication failed: {0}")]
    Auth(String),
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced by one resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
