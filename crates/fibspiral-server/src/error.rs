//! Request-level failures and how they are reported.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fibspiral::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected input; the message is sent back as the body.
    #[error("{0}")]
    BadRequest(String),

    #[error("render failed: {0}")]
    Render(RenderError),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidSize { .. } => ApiError::BadRequest(err.to_string()),
            other => ApiError::Render(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Join(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(message) => {
                tracing::warn!(%message, "rejected request");
                (status, message).into_response()
            }
            err => {
                tracing::error!(error = %err, "request failed");
                (status, "Server error").into_response()
            }
        }
    }
}
