//! Axum route handlers for the resume collaborators.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::resumes::listing::{build_listing, ResumeListing};
use crate::resumes::upload::{upload_resume, UploadForm, UploadReceipt};
use crate::state::AppState;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeListing>, AppError> {
    let records = state
        .backend
        .list_resumes()
        .await
        .map_err(|e| AppError::Backend(format!("Failed to fetch resumes: {e}")))?;
    Ok(Json(build_listing(&records, state.backend.as_ref())))
}

/// POST /api/v1/resumes (multipart: resume_file, department, experience_years)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadReceipt>), AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?,
                );
            }
            "department" | "experience_years" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                if name == "department" {
                    form.department = Some(value);
                } else {
                    form.experience_years = Some(value);
                }
            }
            _ => {}
        }
    }

    let upload = form.into_upload(&state.upload_policy)?;
    let receipt = upload_resume(state.backend.as_ref(), upload).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
