use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

const BUILTIN_WORDS: &str = include_str!("known_words.txt");

/// Local dictionary of keywords accepted without asking the backend.
#[derive(Debug, Clone)]
pub struct KnownWords {
    words: HashSet<String>,
}

impl KnownWords {
    pub fn builtin() -> Self {
        let mut known = Self {
            words: HashSet::new(),
        };
        known.extend_from_text(BUILTIN_WORDS);
        known
    }

    /// Built-in words plus every non-empty line of the file at `path`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut known = Self::builtin();
        if let Some(path) = path {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read known words from {}", path.display()))?;
            let before = known.len();
            known.extend_from_text(&text);
            info!(
                "Loaded {} extra known words from {}",
                known.len() - before,
                path.display()
            );
        }
        Ok(known)
    }

    /// Expects an already normalized (trimmed, lowercase) term.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    fn extend_from_text(&mut self, text: &str) {
        self.words.extend(
            text.lines()
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        );
    }
}
