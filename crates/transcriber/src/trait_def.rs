//! The `Transcriber` trait.

use async_trait::async_trait;

use crate::error::TranscriptionError;
use crate::upload::AudioUpload;

/// Converts uploaded audio into text.
///
/// Implementations are shared across request handlers, so they must be
/// `Send + Sync`. A call either returns the transcript verbatim or fails;
/// there is no retry at this layer.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe one audio upload.
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, TranscriptionError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
