//! Search-page state and the controller that drives the retrieval pipeline.
//!
//! `SearchPage` is plain data with synchronous transitions. `SearchController`
//! owns it behind a mutex that is never held across a backend call, so the
//! page stays readable (e.g. to show "Searching...") while a request is out.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::backend::models::ResultRecord;
use crate::backend::{BackendError, ResumeBackend};
use crate::retrieval::consolidate::consolidate;
use crate::retrieval::dictionary::KnownWords;
use crate::retrieval::dispatch::{dispatch, failure_message, DispatchError, SearchRequest};
use crate::retrieval::display::{ResultRow, ResumePreview};
use crate::retrieval::filters::FilterCriteria;
use crate::retrieval::tags::{normalize_keyword, rejection_message, TagAcquirer, TagOutcome, TagSet};

pub const STATUS_SEARCHING: &str = "Searching...";
pub const STATUS_FAILED: &str = "Search failed";
pub const STATUS_EMPTY: &str = "No resumes found with the selected criteria.";

#[derive(Debug, Default)]
pub struct SearchPage {
    tags: TagSet,
    filters: FilterCriteria,
    results: Vec<ResultRecord>,
    searching: bool,
    status: String,
    error: Option<String>,
    query_error: Option<String>,
}

impl SearchPage {
    /// Enters the searching state, or explains why a search cannot start.
    pub fn begin_search(&mut self) -> Result<SearchRequest, DispatchError> {
        if self.searching {
            return Err(DispatchError::Busy);
        }
        let request = match SearchRequest::new(&self.tags, &self.filters) {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.searching = true;
        self.status = STATUS_SEARCHING.to_string();
        self.error = None;
        Ok(request)
    }

    /// Leaves the searching state with the backend's answer. Results are
    /// replaced, never merged.
    pub fn finish_search(
        &mut self,
        request: &SearchRequest,
        outcome: Result<Vec<ResultRecord>, BackendError>,
    ) {
        self.searching = false;
        match outcome {
            Ok(raw) => {
                let received = raw.len();
                self.results = consolidate(raw, request.filters());
                debug!(
                    "Consolidated {} raw results into {}",
                    received,
                    self.results.len()
                );
                self.status = if self.results.is_empty() {
                    STATUS_EMPTY.to_string()
                } else {
                    format!("Found {} resumes", self.results.len())
                };
            }
            Err(e) => {
                self.results.clear();
                self.error = Some(failure_message(&e));
                self.status = STATUS_FAILED.to_string();
            }
        }
    }

    /// Clears tags, filters and the keyword error. Results stay until the next search.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.filters = FilterCriteria::default();
        self.query_error = None;
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            tags: self.tags.as_slice().to_vec(),
            filters: self.filters,
            searching: self.searching,
            status: self.status.clone(),
            error: self.error.clone(),
            query_error: self.query_error.clone(),
            results: self.results.iter().map(ResultRow::from).collect(),
        }
    }
}

/// Serializable view of the page for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub tags: Vec<String>,
    pub filters: FilterCriteria,
    pub searching: bool,
    pub status: String,
    pub error: Option<String>,
    pub query_error: Option<String>,
    pub results: Vec<ResultRow>,
}

/// Owns one search page and runs the pipeline stages against it.
pub struct SearchController {
    page: Mutex<SearchPage>,
    backend: Arc<dyn ResumeBackend>,
    known_words: Arc<KnownWords>,
}

impl SearchController {
    pub fn new(backend: Arc<dyn ResumeBackend>, known_words: Arc<KnownWords>) -> Self {
        Self {
            page: Mutex::new(SearchPage::default()),
            backend,
            known_words,
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.page.lock().snapshot()
    }

    /// Validate → append → expand for one raw keyword.
    pub async fn submit_keyword(&self, raw: &str) -> TagOutcome {
        self.page.lock().query_error = None;

        let Some(term) = normalize_keyword(raw) else {
            return TagOutcome::Blank;
        };

        let acquirer = TagAcquirer::new(self.backend.as_ref(), self.known_words.as_ref());
        if !acquirer.accepts(&term).await {
            info!("Rejected keyword '{term}'");
            self.page.lock().query_error = Some(rejection_message(&term));
            return TagOutcome::Rejected { term };
        }

        let inserted = self.page.lock().tags.insert(&term);
        if !inserted {
            return TagOutcome::AlreadyPresent { term };
        }

        let related = acquirer.expansions(&term).await;
        let expanded = self.page.lock().tags.merge(related);
        info!("Added keyword '{term}' with {} expansions", expanded.len());
        TagOutcome::Added { term, expanded }
    }

    pub fn remove_tag(&self, index: usize) -> Option<String> {
        self.page.lock().tags.remove(index)
    }

    pub fn set_filters(&self, filters: FilterCriteria) {
        self.page.lock().filters = filters;
    }

    pub fn clear(&self) {
        self.page.lock().clear();
    }

    /// Runs one search. At most one is in flight; a second call while busy
    /// returns `DispatchError::Busy` and leaves the page untouched.
    pub async fn search(&self) -> Result<(), DispatchError> {
        let request = self.page.lock().begin_search()?;
        let guard = InFlight::arm(&self.page);

        let outcome = dispatch(self.backend.as_ref(), &request).await;
        guard.complete(&request, outcome);
        Ok(())
    }

    /// Preview of the result at `index` in the current display order.
    pub fn preview(&self, index: usize) -> Option<ResumePreview> {
        let page = self.page.lock();
        let record = page.results.get(index)?;
        Some(ResumePreview::build(
            record,
            page.tags.as_slice(),
            self.backend.as_ref(),
        ))
    }
}

/// Releases the busy flag if a search future is dropped before finishing.
/// Once `complete` has run, the flag may already belong to the next search,
/// so the guard disarms instead of touching it again.
struct InFlight<'a> {
    page: &'a Mutex<SearchPage>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn arm(page: &'a Mutex<SearchPage>) -> Self {
        Self { page, armed: true }
    }

    fn complete(mut self, request: &SearchRequest, outcome: Result<Vec<ResultRecord>, BackendError>) {
        self.page.lock().finish_search(request, outcome);
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut page = self.page.lock();
        page.searching = false;
        page.status.clear();
    }
}
