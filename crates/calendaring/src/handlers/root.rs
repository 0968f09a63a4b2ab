//! Root route handler.

/// Handler for GET /
///
/// Plain-text usage hint for humans poking at the service.
pub async fn usage() -> &'static str {
    "Usage: GET /get?fromDate=<ISO 8601>&toDate=<ISO 8601>&language=<code>&country=<code>\n"
}
