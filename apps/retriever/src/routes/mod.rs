pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::resumes::handlers as resumes;
use crate::retrieval::handlers as retrieval;
use crate::settings;
use crate::state::AppState;

/// Multipart framing and metadata fields on top of the file itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.upload_policy.max_bytes + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Retrieval page
        .route(
            "/api/v1/search",
            get(retrieval::handle_get_page).post(retrieval::handle_search),
        )
        .route("/api/v1/search/tags", post(retrieval::handle_add_tag))
        .route(
            "/api/v1/search/tags/:index",
            delete(retrieval::handle_remove_tag),
        )
        .route("/api/v1/search/filters", put(retrieval::handle_set_filters))
        .route("/api/v1/search/clear", post(retrieval::handle_clear))
        .route(
            "/api/v1/search/results/:index/preview",
            get(retrieval::handle_preview),
        )
        .route("/api/v1/suggestions", get(retrieval::handle_suggestions))
        .route("/api/v1/departments", get(retrieval::handle_departments))
        // Resume collaborators
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_upload_resume),
        )
        .route("/api/v1/settings", get(settings::handle_settings))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
