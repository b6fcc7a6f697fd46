//! Audio payload handed to a transcriber.

/// Fallback content type when the uploader did not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    /// Original file name as sent by the client.
    pub file_name: String,
    /// MIME type as sent by the client.
    pub content_type: String,
    /// Raw audio bytes.
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    /// Create a new upload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Create an upload whose content type may be missing.
    pub fn with_optional_type(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        Self::new(file_name, content_type, bytes)
    }

    /// Size of the audio payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
