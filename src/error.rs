use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{types::Envelope, utils::DecodeError};

/// Failures of a matched route. The `Display` text is what the caller sees,
/// so it never carries the underlying cause.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid percent encoding")]
    InvalidEncoding(#[from] DecodeError),

    #[error("failed to read request body")]
    BodyRead(#[from] BytesRejection),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidEncoding(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyRead(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::BodyRead(rejection) = &self {
            error!(error = %rejection, "Failed to read request body");
        }
        (self.status(), Json(Envelope::error(self.to_string()))).into_response()
    }
}
