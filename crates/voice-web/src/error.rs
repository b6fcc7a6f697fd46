//! Error types for the HTTP layer.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;
use transcriber::TranscriptionError;

/// Errors a handler can return. Every variant renders as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The speech-to-text service failed.
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    /// The multipart body could not be read (malformed, or over the size limit).
    #[error("{}", .0.body_text())]
    Multipart(#[from] MultipartError),

    /// Database error. Details are logged, never sent to the client.
    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{} not found", entity))
            }
            other => ApiError::Database(other),
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Transcription(_) => StatusCode::BAD_GATEWAY,
            ApiError::Multipart(err) => err.status(),
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent in the response body.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Transcription(err) => {
                tracing::warn!("Transcription failed: {}", err);
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
            }
            ApiError::Validation(_) | ApiError::NotFound(_) | ApiError::Multipart(_) => {
                tracing::debug!(status = status.as_u16(), "{}", self);
            }
        }

        let body = serde_json::json!({
            "error": self.client_message()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
