//! Profile builder route: run the extractor over submitted text.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use database::ProfileData;
use profile_builder::extract_profile_data;
use serde::Deserialize;

use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Extract profile fields from text. Nothing is stored.
pub async fn parse_text(
    payload: std::result::Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ProfileData>> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing text".to_string()))?;

    Ok(Json(extract_profile_data(&text)))
}
