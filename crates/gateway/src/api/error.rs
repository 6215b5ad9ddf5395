use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use ps_domain::error::Error;

/// Handler error: `{error}` with 502 for remote failures, 500 otherwise.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_remote() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::error!(status = %status, error = %self.0, "request failed");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
