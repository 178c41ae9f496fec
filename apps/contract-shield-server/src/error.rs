//! Error types for the Contract Shield server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use text_extract::ExtractionError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    CorruptDocument(String),

    #[error("{0}")]
    InsufficientText(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upload exceeds the size limit: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            ServerError::CorruptDocument(msg) => {
                (StatusCode::BAD_REQUEST, "CORRUPT_DOCUMENT", msg.clone())
            }
            ServerError::InsufficientText(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_TEXT",
                msg.clone(),
            ),
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Error processing file".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractionError> for ServerError {
    fn from(err: ExtractionError) -> Self {
        let message = err.to_string();
        match err {
            ExtractionError::UnsupportedFormat(_) => ServerError::UnsupportedFormat(message),
            ExtractionError::CorruptDocument { .. } => ServerError::CorruptDocument(format!(
                "{}. Please ensure the file is not corrupted.",
                message
            )),
            ExtractionError::InsufficientText { .. } => ServerError::InsufficientText(message),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartError> for ServerError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(err.body_text())
        } else {
            ServerError::InvalidRequest(format!("Failed to read upload: {}", err.body_text()))
        }
    }
}
