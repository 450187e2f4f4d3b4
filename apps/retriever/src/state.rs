use std::sync::Arc;

use crate::backend::ResumeBackend;
use crate::config::Config;
use crate::retrieval::dictionary::KnownWords;
use crate::retrieval::page::SearchController;
use crate::resumes::upload::UploadPolicy;

/// Shared console state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable backend. Default: `HttpBackend` against `BACKEND_URL`.
    pub backend: Arc<dyn ResumeBackend>,
    /// The retrieval page. One per console process.
    pub search: Arc<SearchController>,
    pub known_words: Arc<KnownWords>,
    pub upload_policy: UploadPolicy,
    pub config: Config,
}

impl AppState {
    pub fn new(backend: Arc<dyn ResumeBackend>, known_words: KnownWords, config: Config) -> Self {
        let known_words = Arc::new(known_words);
        Self {
            search: Arc::new(SearchController::new(backend.clone(), known_words.clone())),
            backend,
            known_words,
            upload_policy: UploadPolicy {
                max_bytes: config.max_upload_bytes(),
            },
            config,
        }
    }
}
