//! Configuration for the Whisper client.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Header carrying the API key on every transcription request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Default request timeout for a transcription call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for connecting to a Whisper-compatible endpoint.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Full URL the audio is posted to.
    pub url: String,
    /// Request timeout, covering connect and response.
    pub timeout: Duration,
    /// Key sent in the `X-API-Key` header.
    api_key: SecretString,
}

impl WhisperConfig {
    /// Create a configuration with the default 60 second timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the API key (exposes the secret).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}
