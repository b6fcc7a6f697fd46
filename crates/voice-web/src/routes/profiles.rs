//! Profile routes.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{profile, NewProfile, Profile, ProfileData};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Profile as returned by the API.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: i64,
    pub name: Option<String>,
    pub profile_data: ProfileData,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            profile_data: profile.profile_data,
        }
    }
}

/// ID of a newly created profile.
#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Create a profile from a JSON body.
pub async fn create_profile(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let Json(new_profile) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let id = profile::create_profile(state.db.pool(), &new_profile).await?;
    info!(id, "Profile created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Get a single profile.
pub async fn get_profile(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<ProfileView>> {
    // A non-numeric ID can never match a stored profile.
    let Path(id) = id.map_err(|_| ApiError::NotFound("Profile not found".to_string()))?;

    let profile = profile::get_profile(state.db.pool(), id).await?;
    Ok(Json(profile.into()))
}

/// List every stored profile.
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<ProfileView>>> {
    let profiles = profile::list_profiles(state.db.pool()).await?;
    Ok(Json(profiles.into_iter().map(ProfileView::from).collect()))
}
