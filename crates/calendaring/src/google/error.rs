//! reqwest error and HTTP status mapping to UpstreamError.

use reqwest::StatusCode;

use calendaring_core::holiday::UpstreamError;

/// Maps transport errors to UpstreamError.
pub fn map_reqwest_error(err: reqwest::Error) -> UpstreamError {
    if err.is_decode() {
        UpstreamError::InvalidResponse(err.to_string())
    } else {
        UpstreamError::Network(err.to_string())
    }
}

/// Maps a non-success response to UpstreamError.
pub fn map_status(status: StatusCode, body: String) -> UpstreamError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            UpstreamError::Auth(format!("{}: {}", status, body))
        }
        _ => UpstreamError::Status {
            status: status.as_u16(),
            message: body,
        },
    }
}
