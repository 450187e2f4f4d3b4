//! Resume backend: the remote service that owns parsing, storage, vector
//! search and LLM keyword work.
//!
//! The console never talks to the backend except through [`ResumeBackend`].
//! `AppState` carries an `Arc<dyn ResumeBackend>`; production uses
//! [`http::HttpBackend`], tests use `fake::FakeBackend`.

use async_trait::async_trait;
use thiserror::Error;

pub mod http;
pub mod models;

#[cfg(test)]
pub mod fake;

use models::{ResultRecord, ResumeData, ResumeUpload, RetrieveQuery, UploadResponse};

#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure: connection refused, timeout, malformed body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's `error` field when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected API response format.")]
    UnexpectedShape,
}

impl BackendError {
    /// Builds a status error, preferring the server-supplied message.
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        BackendError::Status { status, message }
    }
}

#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// Asks the backend whether an unknown term is a usable keyword.
    async fn validate_term(&self, term: &str) -> Result<bool, BackendError>;

    /// Related search terms for an accepted keyword.
    async fn expand_term(&self, term: &str) -> Result<Vec<String>, BackendError>;

    /// Runs a search. An absent `results` field is an empty result set.
    async fn retrieve(&self, query: &RetrieveQuery) -> Result<Vec<ResultRecord>, BackendError>;

    /// Every stored resume.
    async fn list_resumes(&self) -> Result<Vec<ResumeData>, BackendError>;

    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadResponse, BackendError>;

    /// URL through which the browser can view a stored file.
    fn proxy_url(&self, file_url: &str) -> String;
}
