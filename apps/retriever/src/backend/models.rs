//! Wire types exchanged with the resume backend.
//!
//! Every payload field is optional: the backend stores whatever its extractor
//! produced, and the console degrades missing values to placeholders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::retrieval::filters::{Department, FilterCriteria};

/// Stored resume metadata, as returned under `data` by search and upload,
/// and as each element of the listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub candidate_name: Option<String>,
    pub email: Option<String>,
    /// Number or numeric string depending on which backend version stored it.
    pub experience_years: Option<Value>,
    pub department: Option<String>,
    pub resume_text: Option<String>,
    /// Reference to the stored file.
    pub s3_url: Option<String>,
    /// Remaining payload fields (skills, year_joined, ...), passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeData {
    /// Stored file reference, if the backend kept a non-empty one.
    pub fn stored_file(&self) -> Option<&str> {
        self.s3_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// One candidate match from `retrieve/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub data: ResumeData,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
}

impl ResultRecord {
    /// Relevance score, missing treated as zero.
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TermRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateResponse {
    #[serde(default)]
    pub valid: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExpandResponse {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RetrieveResponse {
    #[serde(default)]
    pub results: Option<Vec<ResultRecord>>,
}

/// `list/` answers either with a bare array or with `{ "results": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse {
    Bare(Vec<ResumeData>),
    Wrapped { results: Vec<ResumeData> },
}

impl ListResponse {
    pub fn into_records(self) -> Vec<ResumeData> {
        match self {
            ListResponse::Bare(records) => records,
            ListResponse::Wrapped { results } => results,
        }
    }
}

/// Error body shape shared by every backend endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// Parameters of one retrieval call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieveQuery {
    pub query: String,
    pub filters: FilterCriteria,
}

impl RetrieveQuery {
    /// Query-string pairs; unset filters are sent as empty strings.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            (
                "experience",
                self.filters
                    .experience
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
            ),
            (
                "department",
                self.filters
                    .department
                    .map(|d| d.as_str().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

/// A file ready to be posted to `upload/`.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: bytes::Bytes,
    pub department: Department,
    pub experience_years: u32,
}

/// Response of `upload/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: ResumeData,
    #[serde(default)]
    pub qdrant_id: Option<String>,
}
