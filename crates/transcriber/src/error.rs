//! Error types for transcription.

use thiserror::Error;

/// Errors that can occur while transcribing audio.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The transcription service could not be reached (connect failure, timeout).
    #[error("transcription service unreachable")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with a non-200 status. Displays the response body.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    /// The success response could not be decoded into a transcript.
    #[error("invalid transcription response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The uploaded audio could not be turned into a request.
    #[error("invalid audio upload: {0}")]
    InvalidUpload(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}
