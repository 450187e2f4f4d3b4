use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Informational settings page: how the backend is set up, plus the
/// console's own live configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsReport {
    pub vector_store: &'static str,
    pub embedding_dimensions: u32,
    pub file_storage: &'static str,
    pub relevance_threshold: f32,
    pub llm_keyword_highlighting: bool,
    pub accepted_file_types: [&'static str; 2],
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub max_upload_mb: usize,
    pub known_words: usize,
}

/// GET /api/v1/settings
pub async fn handle_settings(State(state): State<AppState>) -> Json<SettingsReport> {
    Json(SettingsReport {
        vector_store: "Qdrant",
        embedding_dimensions: 384,
        file_storage: "AWS S3",
        relevance_threshold: 0.3,
        llm_keyword_highlighting: true,
        accepted_file_types: ["pdf", "docx"],
        backend_url: state.config.backend_url.clone(),
        backend_timeout_secs: state.config.backend_timeout_secs,
        max_upload_mb: state.config.max_upload_mb,
        known_words: state.known_words.len(),
    })
}
