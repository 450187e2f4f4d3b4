//! Upload collaborator: checks a submitted file and its metadata, then hands
//! it to the backend for parsing and storage.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::models::{ResumeData, ResumeUpload};
use crate::backend::{BackendError, ResumeBackend};
use crate::retrieval::filters::Department;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0} (unsupported)")]
    Unsupported(String),

    #[error("{0} too large")]
    TooLarge(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Upload failed for {file_name}: {source}")]
    Backend {
        file_name: String,
        #[source]
        source: BackendError,
    },
}

impl UploadError {
    /// True when the submission itself was refused, as opposed to a backend failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, UploadError::Backend { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

/// Raw multipart fields as received.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub bytes: Option<Bytes>,
    pub department: Option<String>,
    pub experience_years: Option<String>,
}

impl UploadForm {
    /// All three steps (file, department, experience) must be filled in.
    pub fn into_upload(self, policy: &UploadPolicy) -> Result<ResumeUpload, UploadError> {
        let (file_name, bytes) = match (self.file_name, self.bytes) {
            (Some(name), Some(bytes)) if !name.trim().is_empty() => (name, bytes),
            _ => return Err(UploadError::MissingField("resume_file")),
        };
        let department = non_blank(self.department).ok_or(UploadError::MissingField("department"))?;
        let experience =
            non_blank(self.experience_years).ok_or(UploadError::MissingField("experience_years"))?;

        let department = department
            .parse::<Department>()
            .map_err(|e| UploadError::Invalid {
                field: "department",
                reason: e.to_string(),
            })?;
        let experience_years = experience.parse::<u32>().map_err(|_| UploadError::Invalid {
            field: "experience_years",
            reason: format!("'{experience}' is not a whole number of years"),
        })?;

        let (file_name, content_type) = policy.check(&file_name, bytes.len())?;
        Ok(ResumeUpload {
            file_name,
            content_type,
            bytes,
            department,
            experience_years,
        })
    }
}

impl UploadPolicy {
    /// Accepts `.pdf` and `.docx` within the size limit and returns the name and
    /// content type to send. A `.docx` is relabelled as PDF; its bytes are not converted.
    pub fn check(&self, file_name: &str, size: usize) -> Result<(String, String), UploadError> {
        let unsupported = || UploadError::Unsupported(file_name.to_string());
        let (stem, extension) = file_name.rsplit_once('.').ok_or_else(unsupported)?;
        let sent_name = match extension.to_ascii_lowercase().as_str() {
            "pdf" => file_name.to_string(),
            "docx" => format!("{stem}.pdf"),
            _ => return Err(unsupported()),
        };

        if size > self.max_bytes {
            return Err(UploadError::TooLarge(file_name.to_string()));
        }
        Ok((sent_name, PDF_MIME.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    pub id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub message: Option<String>,
    pub qdrant_id: Option<String>,
    pub metadata: ResumeData,
}

pub async fn upload_resume(
    backend: &dyn ResumeBackend,
    upload: ResumeUpload,
) -> Result<UploadReceipt, UploadError> {
    info!(
        "Uploading '{}' as {} / {} years",
        upload.file_name, upload.department, upload.experience_years
    );

    let response = backend.upload_resume(&upload).await.map_err(|source| {
        error!("Upload failed for {}: {source}", upload.file_name);
        UploadError::Backend {
            file_name: upload.file_name.clone(),
            source,
        }
    })?;

    Ok(UploadReceipt {
        id: Uuid::new_v4(),
        file_name: upload.file_name,
        uploaded_at: Utc::now(),
        message: response.message,
        qdrant_id: response.qdrant_id,
        metadata: response.data,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
