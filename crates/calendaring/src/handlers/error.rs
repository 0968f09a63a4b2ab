use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calendaring_core::holiday::{resolve_error_to_status_code, ResolveError, OPAQUE_ERROR_MARKER};

/// Handler error. Every failure reaches the client as the same opaque body;
/// the cause is only logged.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(resolve_error) = self.0.downcast_ref::<ResolveError>() {
            let code = resolve_error_to_status_code(resolve_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
        } else {
            StatusCode::BAD_REQUEST
        };

        tracing::error!(error = %self.0, status = %status_code, "Request failed");

        (
            status_code,
            Json(serde_json::json!({ "error": OPAQUE_ERROR_MARKER })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
