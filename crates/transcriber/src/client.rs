//! HTTP client for a Whisper-compatible transcription endpoint.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{WhisperConfig, API_KEY_HEADER};
use crate::error::TranscriptionError;
use crate::trait_def::Transcriber;
use crate::upload::AudioUpload;

/// Multipart field the audio is sent under.
const FILE_FIELD: &str = "file";

/// Success body returned by the transcription service.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for a remote Whisper service.
#[derive(Clone)]
pub struct WhisperClient {
    http: Client,
    config: WhisperConfig,
}

impl WhisperClient {
    /// Build a client. No request is made until [`Transcriber::transcribe`].
    pub fn new(config: WhisperConfig) -> Result<Self, TranscriptionError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranscriptionError::Client(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, TranscriptionError> {
        info!(
            url = %self.config.url,
            file = %audio.file_name,
            bytes = audio.len(),
            "Calling Whisper"
        );

        let part = Part::bytes(audio.bytes)
            .file_name(audio.file_name)
            .mime_str(&audio.content_type)
            .map_err(|e| TranscriptionError::InvalidUpload(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&self.config.url)
            .header(API_KEY_HEADER, self.config.api_key())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    return TranscriptionError::Client(e.to_string());
                }
                warn!(url = %self.config.url, error = %e, "Whisper service unreachable");
                TranscriptionError::Unreachable(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(TranscriptionError::Unreachable)?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Whisper returned an error");
            return Err(TranscriptionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body)?;
        debug!(chars = parsed.text.len(), "Transcription complete");

        Ok(parsed.text)
    }

    fn name(&self) -> &str {
        "WhisperClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use axum::extract::Multipart;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/transcribe", addr)
    }

    /// Echoes back what it received so the test can check the request shape.
    async fn echo_handler(
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> (AxumStatus, Json<serde_json::Value>) {
        let key = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() == Some(FILE_FIELD) {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                let text = format!("{key}|{file_name}|{content_type}|{}", bytes.len());
                return (AxumStatus::OK, Json(json!({ "text": text })));
            }
        }

        (AxumStatus::BAD_REQUEST, Json(json!({ "error": "no file" })))
    }

    fn upload() -> AudioUpload {
        AudioUpload::new("note.webm", "audio/webm", vec![7u8; 32])
    }

    #[tokio::test]
    async fn test_transcribe_success() {
        let url = spawn_server(Router::new().route("/transcribe", post(echo_handler))).await;
        let client = WhisperClient::new(WhisperConfig::new(url, "secret-key")).unwrap();

        let text = client.transcribe(upload()).await.unwrap();
        assert_eq!(text, "secret-key|note.webm|audio/webm|32");
    }

    #[tokio::test]
    async fn test_non_200_carries_body() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "model is still loading") }),
        );
        let url = spawn_server(app).await;
        let client = WhisperClient::new(WhisperConfig::new(url, "k")).unwrap();

        let err = client.transcribe(upload()).await.unwrap_err();
        match &err {
            TranscriptionError::Upstream { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "model is still loading");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "model is still loading");
    }

    #[tokio::test]
    async fn test_other_success_codes_are_errors() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async { (AxumStatus::ACCEPTED, Json(json!({ "text": "queued" }))) }),
        );
        let url = spawn_server(app).await;
        let client = WhisperClient::new(WhisperConfig::new(url, "k")).unwrap();

        let err = client.transcribe(upload()).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::Upstream { status: 202, .. }));
    }

    #[tokio::test]
    async fn test_missing_text_field_is_decode_error() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async { Json(json!({ "transcript": "wrong key" })) }),
        );
        let url = spawn_server(app).await;
        let client = WhisperClient::new(WhisperConfig::new(url, "k")).unwrap();

        let err = client.transcribe(upload()).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = WhisperConfig::new(format!("http://{}/transcribe", addr), "k");
        let client = WhisperClient::new(config).unwrap();

        let err = client.transcribe(upload()).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::Unreachable(_)));
        assert_eq!(err.to_string(), "transcription service unreachable");
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "text": "too late" }))
            }),
        );
        let url = spawn_server(app).await;
        let config = WhisperConfig::new(url, "k").with_timeout(Duration::from_millis(200));
        let client = WhisperClient::new(config).unwrap();

        let err = client.transcribe(upload()).await.unwrap_err();
        match err {
            TranscriptionError::Unreachable(inner) => assert!(inner.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_content_type() {
        let client = WhisperClient::new(WhisperConfig::new("http://127.0.0.1:1/", "k")).unwrap();
        let audio = AudioUpload::new("note.wav", "not a mime type", vec![1]);

        let err = client.transcribe(audio).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidUpload(_)));
    }
}
