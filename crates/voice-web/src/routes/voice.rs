//! Voice input routes: transcription and the upload → profile flow.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use database::{profile, NewProfile, ProfileData};
use profile_builder::{extract_profile_data, NAME, PLACEHOLDER_NAME};
use serde::Serialize;
use tracing::{error, info};
use transcriber::AudioUpload;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Multipart field read by `/voice/transcribe`.
const TRANSCRIBE_FIELD: &str = "audio";
/// Multipart field read by `/voice/upload`.
const UPLOAD_FIELD: &str = "file";

/// Transcription result.
#[derive(Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

/// Result of the full upload flow.
#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub id: i64,
    pub transcript: String,
    pub structured: ProfileData,
}

/// Transcribe an uploaded audio file without storing anything.
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>> {
    let audio = read_file_field(multipart, TRANSCRIBE_FIELD, FileName::Optional)
        .await?
        .ok_or_else(|| ApiError::Validation("Missing audio file".to_string()))?;

    let text = state.transcriber.transcribe(audio).await?;

    Ok(Json(TranscribeResponse { text }))
}

/// Upload an audio file, transcribe it, extract fields and store a profile.
///
/// A failed transcription stops the flow before anything is written.
pub async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let audio = read_file_field(multipart, UPLOAD_FIELD, FileName::Required)
        .await?
        .ok_or_else(|| ApiError::Validation("No audio file uploaded".to_string()))?;

    info!(
        file = %audio.file_name,
        bytes = audio.len(),
        transcriber = state.transcriber.name(),
        "Processing voice upload"
    );

    let transcript = state.transcriber.transcribe(audio).await?;
    let structured = extract_profile_data(&transcript);

    let name = structured
        .get(NAME)
        .and_then(|v| v.as_str())
        .unwrap_or(PLACEHOLDER_NAME)
        .to_string();
    let new_profile = NewProfile::named(name, structured.clone());

    let id = profile::create_profile(state.db.pool(), &new_profile)
        .await
        .map_err(|err| {
            error!(
                transcript_chars = transcript.len(),
                "Storing profile failed, transcript discarded"
            );
            err
        })?;

    info!(id, fields = structured.len(), "Profile created from voice upload");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Profile created successfully".to_string(),
            id,
            transcript,
            structured,
        }),
    ))
}

/// How strictly a file field's name is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileName {
    /// Any file part counts, even with an empty file name.
    Optional,
    /// An empty file name (an empty browser file input) counts as missing.
    Required,
}

/// Find the named file field in a multipart body.
///
/// Returns `None` when the body is not multipart, the field is absent or is
/// a plain form value, or `FileName::Required` is asked for and the file name
/// is empty. Errors while reading the body keep their own status, so an upload
/// over the body limit answers 413.
async fn read_file_field(
    multipart: std::result::Result<Multipart, MultipartRejection>,
    field_name: &str,
    file_name_rule: FileName,
) -> Result<Option<AudioUpload>> {
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = match (field.file_name(), file_name_rule) {
            (None, _) => return Ok(None),
            (Some(""), FileName::Required) => return Ok(None),
            (Some(name), _) => name.to_string(),
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        return Ok(Some(AudioUpload::with_optional_type(
            file_name,
            content_type,
            bytes.to_vec(),
        )));
    }

    Ok(None)
}
