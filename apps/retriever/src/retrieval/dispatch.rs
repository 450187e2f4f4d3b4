use thiserror::Error;
use tracing::{error, info};

use crate::backend::models::{ResultRecord, RetrieveQuery};
use crate::backend::{BackendError, ResumeBackend};
use crate::retrieval::filters::FilterCriteria;
use crate::retrieval::tags::TagSet;

pub const NO_CRITERIA_MESSAGE: &str = "Please enter at least one keyword or select filters.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("{}", NO_CRITERIA_MESSAGE)]
    NoCriteria,

    #[error("A search is already in progress")]
    Busy,
}

/// A search that passed the criteria precondition, frozen at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: RetrieveQuery,
}

impl SearchRequest {
    /// Needs at least one tag or one filter.
    pub fn new(tags: &TagSet, filters: &FilterCriteria) -> Result<Self, DispatchError> {
        if tags.is_empty() && filters.is_empty() {
            return Err(DispatchError::NoCriteria);
        }
        Ok(Self {
            query: RetrieveQuery {
                query: tags.query_string(),
                filters: *filters,
            },
        })
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.query.filters
    }
}

pub async fn dispatch(
    backend: &dyn ResumeBackend,
    request: &SearchRequest,
) -> Result<Vec<ResultRecord>, BackendError> {
    info!(
        "Dispatching search query='{}' filters={:?}",
        request.query.query, request.query.filters
    );
    backend.retrieve(&request.query).await.map_err(|e| {
        error!("Search failed: {e}");
        e
    })
}

/// Inline error text for a failed search.
pub fn failure_message(err: &BackendError) -> String {
    format!("Search failed: {err}")
}
