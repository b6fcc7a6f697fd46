//! Speech-to-text client for worker voice notes.
//!
//! This crate provides the [`Transcriber`] trait and two implementations:
//!
//! - [`WhisperClient`] - posts audio to a remote Whisper-compatible endpoint
//! - [`MockTranscriber`] - returns a canned transcript or failure, for tests
//!   and for running without a speech-to-text service
//!
//! # Example
//!
//! ```no_run
//! use transcriber::{AudioUpload, Transcriber, WhisperClient, WhisperConfig};
//!
//! # async fn example() -> Result<(), transcriber::TranscriptionError> {
//! let config = WhisperConfig::new("http://127.0.0.1:9000/transcribe", "api-key");
//! let client = WhisperClient::new(config)?;
//!
//! let audio = AudioUpload::new("note.webm", "audio/webm", vec![0u8; 16]);
//! let text = client.transcribe(audio).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod mock;
mod trait_def;
mod upload;

pub use client::WhisperClient;
pub use config::{WhisperConfig, API_KEY_HEADER, DEFAULT_TIMEOUT};
pub use error::TranscriptionError;
pub use mock::MockTranscriber;
pub use trait_def::Transcriber;
pub use upload::AudioUpload;
