//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub transcriber: String,
    pub profiles: i64,
}

/// Health check endpoint. Touches the database; a storage failure returns 500.
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>> {
    let profiles = database::profile::count_profiles(state.db.pool()).await?;

    Ok(Json(Health {
        status: "ok".to_string(),
        transcriber: state.transcriber.name().to_string(),
        profiles,
    }))
}
