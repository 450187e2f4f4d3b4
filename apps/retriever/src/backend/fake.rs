//! In-memory backend for unit tests. Records every remote call it receives.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::models::{ResultRecord, ResumeData, ResumeUpload, RetrieveQuery, UploadResponse};
use super::{BackendError, ResumeBackend};

#[derive(Default)]
pub struct FakeBackend {
    valid_terms: Vec<String>,
    validation_down: bool,
    expansions: HashMap<String, Vec<String>>,
    expansion_down: bool,
    results: Vec<ResultRecord>,
    retrieve_error: Option<String>,
    listing: Vec<ResumeData>,
    retrieve_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<String>>,
    last_query: Mutex<Option<RetrieveQuery>>,
    uploads: Mutex<Vec<ResumeUpload>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepting(mut self, term: &str) -> Self {
        self.valid_terms.push(term.to_string());
        self
    }

    pub fn validation_down(mut self) -> Self {
        self.validation_down = true;
        self
    }

    pub fn expanding(mut self, term: &str, related: &[&str]) -> Self {
        self.expansions.insert(
            term.to_string(),
            related.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn expansion_down(mut self) -> Self {
        self.expansion_down = true;
        self
    }

    pub fn returning(mut self, results: Vec<ResultRecord>) -> Self {
        self.results = results;
        self
    }

    pub fn failing_retrieve(mut self, server_message: &str) -> Self {
        self.retrieve_error = Some(server_message.to_string());
        self
    }

    pub fn listing(mut self, records: Vec<ResumeData>) -> Self {
        self.listing = records;
        self
    }

    /// Holds every `retrieve` call open until `gate` is notified.
    pub fn retrieve_held_by(mut self, gate: Arc<Notify>) -> Self {
        self.retrieve_gate = Some(gate);
        self
    }

    /// Number of calls whose label starts with `prefix` (`validate:`, `expand:`, `retrieve:`).
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_query(&self) -> Option<RetrieveQuery> {
        self.last_query.lock().clone()
    }

    pub fn uploads(&self) -> Vec<ResumeUpload> {
        self.uploads.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl ResumeBackend for FakeBackend {
    async fn validate_term(&self, term: &str) -> Result<bool, BackendError> {
        self.record(format!("validate:{term}"));
        if self.validation_down {
            return Err(BackendError::from_status(500, Some("LLM unavailable".into())));
        }
        Ok(self.valid_terms.iter().any(|t| t == term))
    }

    async fn expand_term(&self, term: &str) -> Result<Vec<String>, BackendError> {
        self.record(format!("expand:{term}"));
        if self.expansion_down {
            return Err(BackendError::from_status(503, None));
        }
        Ok(self.expansions.get(term).cloned().unwrap_or_default())
    }

    async fn retrieve(&self, query: &RetrieveQuery) -> Result<Vec<ResultRecord>, BackendError> {
        self.record(format!("retrieve:{}", query.query));
        *self.last_query.lock() = Some(query.clone());
        if let Some(gate) = &self.retrieve_gate {
            gate.notified().await;
        }
        match &self.retrieve_error {
            Some(message) => Err(BackendError::from_status(500, Some(message.clone()))),
            None => Ok(self.results.clone()),
        }
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeData>, BackendError> {
        self.record("list:".to_string());
        Ok(self.listing.clone())
    }

    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadResponse, BackendError> {
        self.record(format!("upload:{}", upload.file_name));
        self.uploads.lock().push(upload.clone());
        Ok(UploadResponse {
            message: Some("Upload and processing complete!".to_string()),
            data: ResumeData {
                department: Some(upload.department.as_str().to_string()),
                experience_years: Some(serde_json::json!(upload.experience_years)),
                ..ResumeData::default()
            },
            qdrant_id: Some("fake-point".to_string()),
        })
    }

    fn proxy_url(&self, file_url: &str) -> String {
        format!("http://backend.test/api/proxy_resume/?file_url={file_url}")
    }
}
