//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use transcriber::Transcriber;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Profile store.
    pub db: Database,
    /// Speech-to-text backend.
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, transcriber: Arc<dyn Transcriber>) -> Self {
        Self { db, transcriber }
    }
}
