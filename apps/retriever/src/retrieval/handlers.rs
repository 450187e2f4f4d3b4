//! Axum route handlers for the retrieval page.
//!
//! Keyword rejections, empty criteria and failed searches come back as page
//! state with 200; only requests the UI should never send get an error status.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::retrieval::dispatch::DispatchError;
use crate::retrieval::display::ResumePreview;
use crate::retrieval::filters::{parse_department_selector, Department, FilterCriteria};
use crate::retrieval::page::PageSnapshot;
use crate::retrieval::tags::TagOutcome;
use crate::retrieval::SUGGESTIONS;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddTagRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct AddTagResponse {
    pub result: TagOutcome,
    pub page: PageSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct FiltersRequest {
    pub experience: Option<u32>,
    /// Department label; empty or "Any" clears the filter.
    pub department: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentGroup {
    pub label: &'static str,
    pub departments: Vec<Department>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/search
pub async fn handle_get_page(State(state): State<AppState>) -> Json<PageSnapshot> {
    Json(state.search.snapshot())
}

/// POST /api/v1/search/tags
pub async fn handle_add_tag(
    State(state): State<AppState>,
    Json(req): Json<AddTagRequest>,
) -> Json<AddTagResponse> {
    let result = state.search.submit_keyword(&req.input).await;
    Json(AddTagResponse {
        result,
        page: state.search.snapshot(),
    })
}

/// DELETE /api/v1/search/tags/:index
pub async fn handle_remove_tag(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<PageSnapshot>, AppError> {
    state
        .search
        .remove_tag(index)
        .ok_or_else(|| AppError::NotFound(format!("No tag at position {index}")))?;
    Ok(Json(state.search.snapshot()))
}

/// PUT /api/v1/search/filters
pub async fn handle_set_filters(
    State(state): State<AppState>,
    Json(req): Json<FiltersRequest>,
) -> Result<Json<PageSnapshot>, AppError> {
    let department = parse_department_selector(req.department.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    state.search.set_filters(FilterCriteria {
        experience: req.experience,
        department,
    });
    Ok(Json(state.search.snapshot()))
}

/// POST /api/v1/search
pub async fn handle_search(State(state): State<AppState>) -> Result<Json<PageSnapshot>, AppError> {
    match state.search.search().await {
        Ok(()) | Err(DispatchError::NoCriteria) => Ok(Json(state.search.snapshot())),
        Err(DispatchError::Busy) => Err(AppError::Conflict(DispatchError::Busy.to_string())),
    }
}

/// POST /api/v1/search/clear
pub async fn handle_clear(State(state): State<AppState>) -> Json<PageSnapshot> {
    state.search.clear();
    Json(state.search.snapshot())
}

/// GET /api/v1/search/results/:index/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ResumePreview>, AppError> {
    let preview = state
        .search
        .preview(index)
        .ok_or_else(|| AppError::NotFound(format!("No result at position {index}")))?;
    Ok(Json(preview))
}

/// GET /api/v1/suggestions
pub async fn handle_suggestions() -> Json<Vec<&'static str>> {
    Json(SUGGESTIONS.to_vec())
}

/// GET /api/v1/departments
pub async fn handle_departments() -> Json<Vec<DepartmentGroup>> {
    let groups = Department::GROUPS
        .iter()
        .map(|&label| DepartmentGroup {
            label,
            departments: Department::ALL
                .into_iter()
                .filter(|d| d.group() == label)
                .collect(),
        })
        .collect();
    Json(groups)
}
