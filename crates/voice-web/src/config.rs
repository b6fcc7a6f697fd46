//! Configuration loaded from environment variables.

use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use transcriber::{
    MockTranscriber, Transcriber, TranscriptionError, WhisperClient, WhisperConfig,
    DEFAULT_TIMEOUT,
};

/// Secret used when `SECRET_KEY` is not set.
const DEV_SECRET_KEY: &str = "dev_secret";

/// Default upload limit (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Which speech-to-text implementation handles uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriberBackend {
    /// Remote Whisper endpoint.
    Whisper,
    /// Canned transcript, no network.
    Mock,
}

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Debug mode (verbose logs, allows `reset-db`).
    pub debug: bool,
    /// Transcriber implementation.
    pub backend: TranscriberBackend,
    /// Whisper endpoint URL.
    pub whisper_url: Option<String>,
    /// Timeout for one transcription call.
    pub whisper_timeout: Duration,
    /// Maximum accepted request body size.
    pub max_upload_bytes: usize,
    whisper_api_key: SecretString,
    secret_key: SecretString,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `APP_HOST` | Bind host | `127.0.0.1` |
    /// | `APP_PORT` | Bind port | `5001` |
    /// | `APP_DEBUG` | `1` or `true` enables debug mode | `0` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:worker_profiles.db?mode=rwc` |
    /// | `SECRET_KEY` | Application secret | `dev_secret` |
    /// | `TRANSCRIBER_BACKEND` | `whisper` or `mock` | `whisper` |
    /// | `WHISPER_URL` | Transcription endpoint | (required for `whisper`) |
    /// | `WHISPER_API_KEY` | Sent as `X-API-Key` | empty |
    /// | `WHISPER_TIMEOUT_SECS` | Transcription timeout | `60` |
    /// | `MAX_UPLOAD_BYTES` | Request body limit | `26214400` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("APP_PORT")
            .unwrap_or_else(|| "5001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("APP_PORT"))?;
        let addr = (host.as_str(), port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ConfigError::InvalidAddr(format!("{}:{}", host, port)))?;

        let debug = var("APP_DEBUG")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        let database_url = var("DATABASE_URL")
            .unwrap_or_else(|| "sqlite:worker_profiles.db?mode=rwc".to_string());

        let secret_key = SecretString::from(
            var("SECRET_KEY").unwrap_or_else(|| DEV_SECRET_KEY.to_string()),
        );

        let backend = match var("TRANSCRIBER_BACKEND")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            None | Some("whisper") => TranscriberBackend::Whisper,
            Some("mock") => TranscriberBackend::Mock,
            Some(_) => return Err(ConfigError::Invalid("TRANSCRIBER_BACKEND")),
        };

        let whisper_url = var("WHISPER_URL");
        let whisper_api_key = SecretString::from(var("WHISPER_API_KEY").unwrap_or_default());
        let whisper_timeout = match var("WHISPER_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("WHISPER_TIMEOUT_SECS"))?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("MAX_UPLOAD_BYTES"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            addr,
            database_url,
            debug,
            backend,
            whisper_url,
            whisper_timeout,
            max_upload_bytes,
            whisper_api_key,
            secret_key,
        })
    }

    /// Whether `SECRET_KEY` was left at its development default.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key.expose_secret() == DEV_SECRET_KEY
    }

    /// Build the configured transcriber.
    pub fn transcriber(&self) -> Result<Arc<dyn Transcriber>, ConfigError> {
        match self.backend {
            TranscriberBackend::Mock => Ok(Arc::new(MockTranscriber::default())),
            TranscriberBackend::Whisper => {
                let url = self.whisper_url.clone().ok_or(ConfigError::MissingWhisperUrl)?;
                let config = WhisperConfig::new(url, self.whisper_api_key.expose_secret())
                    .with_timeout(self.whisper_timeout);
                Ok(Arc::new(WhisperClient::new(config)?))
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address: {0}")]
    InvalidAddr(String),

    #[error("Invalid value for {0}")]
    Invalid(&'static str),

    #[error("WHISPER_URL environment variable is required when TRANSCRIBER_BACKEND=whisper")]
    MissingWhisperUrl,

    #[error("Failed to build transcriber: {0}")]
    Transcriber(#[from] TranscriptionError),
}
