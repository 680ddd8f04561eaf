use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use packtally_utils::{ErrorResponse, PacktallyError};
use tokio::task::JoinError;

/// Carries a `PacktallyError` out of a handler as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub PacktallyError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<PacktallyError> for ApiError {
    fn from(error: PacktallyError) -> Self {
        Self(error)
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self(PacktallyError::payload_too_large(error.body_text()))
        } else {
            Self(PacktallyError::validation("multipart", error.body_text()))
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        Self(PacktallyError::internal(format!("Sheet processing task failed: {error}")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
