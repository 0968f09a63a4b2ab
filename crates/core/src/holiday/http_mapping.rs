//! Pure functions for mapping resolution errors to HTTP responses.
//!
//! Clients get one opaque failure shape: they cannot tell a malformed query
//! from an upstream outage.

use super::ResolveError;

/// Value of the `error` field in every failure body.
pub const OPAQUE_ERROR_MARKER: &str = "unknown";

/// Maps a [`ResolveError`] to an HTTP status code.
///
/// Every variant maps to 400 (Bad Request).
///
/// # Examples
///
/// ```
/// use calendaring_core::holiday::{resolve_error_to_status_code, ResolveError, UpstreamError};
///
/// let error = ResolveError::Upstream(UpstreamError::Network("reset".to_string()));
/// assert_eq!(resolve_error_to_status_code(&error), 400);
/// ```
pub fn resolve_error_to_status_code(error: &ResolveError) -> u16 {
    match error {
        ResolveError::InvalidQuery(_) => 400,
        ResolveError::Upstream(_) => 400,
    }
}
