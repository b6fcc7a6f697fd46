//! Route handlers for the voice profile backend.

pub mod builder;
pub mod health;
pub mod profiles;
pub mod voice;

#[cfg(test)]
mod test_support;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Voice input
        .route("/voice/transcribe", post(voice::transcribe))
        .route("/voice/upload", post(voice::upload))
        // Profiles
        .route(
            "/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/profiles/",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route("/profiles/:id", get(profiles::get_profile))
        // Profile builder
        .route("/builder/parse", post(builder::parse_text))
}

/// Build the complete application: routes, request tracing and body limit.
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    router()
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
