use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beacon_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the callable-protocol error
/// envelope: `{"error": {"status", "code", "message"}}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `beacon_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// HTTP status for each error kind, as used by Firebase callable functions.
pub fn http_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        CoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::FailedPrecondition(_) => StatusCode::BAD_REQUEST,
        CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The dispatcher has already logged the failure.
        let AppError::Core(core) = self;

        let body = json!({
            "error": {
                "status": core.status(),
                "code": core.code(),
                "message": core.message(),
            }
        });

        (http_status(&core), axum::Json(body)).into_response()
    }
}
