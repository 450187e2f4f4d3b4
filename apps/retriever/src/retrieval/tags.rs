//! Keyword tags and the validate → append → expand acquisition steps.
//!
//! Validation fails closed (any backend error rejects the term); expansion
//! fails open (errors are logged and yield no extra tags).

use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::ResumeBackend;
use crate::retrieval::dictionary::KnownWords;

/// Trims and lowercases raw input. `None` for blank input.
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

/// Active keyword tags: unique, lowercase, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Appends `raw` after normalizing it. Returns false if blank or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_keyword(raw) {
            Some(term) if !self.contains(&term) => {
                self.tags.push(term);
                true
            }
            _ => false,
        }
    }

    /// Set-merges `terms`; returns the ones actually added.
    pub fn merge<I, S>(&mut self, terms: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = Vec::new();
        for term in terms {
            if self.insert(term.as_ref()) {
                if let Some(last) = self.tags.last() {
                    added.push(last.clone());
                }
            }
        }
        added
    }

    pub fn contains(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.tags.iter().any(|t| *t == term)
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.tags.len()).then(|| self.tags.remove(index))
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// All tags joined by single spaces, the backend's query format.
    pub fn query_string(&self) -> String {
        self.tags.join(" ")
    }
}

/// Outcome of submitting one raw keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TagOutcome {
    Blank,
    Rejected { term: String },
    AlreadyPresent { term: String },
    Added { term: String, expanded: Vec<String> },
}

/// User-facing text for a rejected term.
pub fn rejection_message(term: &str) -> String {
    format!("\"{term}\" is not a valid keyword.")
}

/// The two remote-backed steps of tag acquisition.
pub struct TagAcquirer<'a> {
    backend: &'a dyn ResumeBackend,
    known_words: &'a KnownWords,
}

impl<'a> TagAcquirer<'a> {
    pub fn new(backend: &'a dyn ResumeBackend, known_words: &'a KnownWords) -> Self {
        Self {
            backend,
            known_words,
        }
    }

    /// Dictionary hit accepts locally; otherwise only an affirmative backend answer does.
    pub async fn accepts(&self, term: &str) -> bool {
        if self.known_words.contains(term) {
            debug!("'{term}' accepted from known words");
            return true;
        }

        match self.backend.validate_term(term).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Keyword validation failed for '{term}': {e}");
                false
            }
        }
    }

    pub async fn expansions(&self, term: &str) -> Vec<String> {
        match self.backend.expand_term(term).await {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!("Keyword expansion failed for '{term}': {e}");
                Vec::new()
            }
        }
    }
}
