use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use filemgr_common::types::ErrorResponse;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// Any filesystem failure; the OS message is passed through unchanged.
    #[error("{0}")]
    OperationFailed(#[from] std::io::Error),
}

impl AppError {
    pub fn missing_path() -> Self {
        AppError::BadRequest("No path provided".into())
    }

    pub fn kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            AppError::OperationFailed(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::OperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // The body could not be read at all; that is not the caller's input.
            JsonRejection::BytesRejection(_) => AppError::OperationFailed(std::io::Error::new(
                std::io::ErrorKind::Other,
                rejection.body_text(),
            )),
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(kind) = self.kind() {
            tracing::warn!(?kind, "filesystem operation failed: {}", self);
        }
        (
            self.status_code(),
            Json(ErrorResponse { error: self.to_string() }),
        )
            .into_response()
    }
}
