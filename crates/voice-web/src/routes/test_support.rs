//! Helpers for driving the router in handler tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use database::Database;
use serde_json::Value;
use tower::ServiceExt;
use transcriber::MockTranscriber;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::state::AppState;

const BOUNDARY: &str = "voice-web-test-boundary";

pub(crate) async fn test_state(transcriber: MockTranscriber) -> AppState {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    AppState::new(db, Arc::new(transcriber))
}

pub(crate) fn test_app(state: AppState) -> Router {
    test_app_with_limit(state, DEFAULT_MAX_UPLOAD_BYTES)
}

pub(crate) fn test_app_with_limit(state: AppState, max_upload_bytes: usize) -> Router {
    super::app(state, max_upload_bytes)
}

/// Send a request and decode the JSON response body.
pub(crate) async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub(crate) fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A multipart request with a single file field.
pub(crate) fn post_file(uri: &str, field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: audio/webm\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
