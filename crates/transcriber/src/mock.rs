//! Canned transcriber for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TranscriptionError;
use crate::trait_def::Transcriber;
use crate::upload::AudioUpload;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Upstream { status: u16, body: String },
}

/// A transcriber that never touches the network.
///
/// Returns the same reply for every upload and counts how often it was
/// called, so tests can check that a failing path stopped early.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Always succeed with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail as if the service answered `status` with `body`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Upstream {
                status,
                body: body.into(),
            },
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of transcribe calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::with_text("")
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(file = %audio.file_name, bytes = audio.len(), "Mock transcription");

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Upstream { status, body } => Err(TranscriptionError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "MockTranscriber"
    }
}
