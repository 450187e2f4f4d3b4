//! Display-ready views of consolidated results: table rows and the resume preview.

use regex::RegexBuilder;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::backend::models::{ResultRecord, ResumeData};
use crate::backend::ResumeBackend;

pub const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub name: String,
    pub email: String,
    pub experience: String,
    pub department: String,
    /// Rounded score with a percent sign, e.g. `95%`.
    pub score: String,
    pub keywords: String,
    pub has_file: bool,
}

impl From<&ResultRecord> for ResultRow {
    fn from(record: &ResultRecord) -> Self {
        let data = &record.data;
        Self {
            name: text_or(data.candidate_name.as_deref(), MISSING),
            email: text_or(data.email.as_deref(), MISSING),
            experience: data
                .experience_years
                .as_ref()
                .and_then(value_text)
                .map(|years| format!("{years} years"))
                .unwrap_or_else(|| MISSING.to_string()),
            department: text_or(data.department.as_deref(), MISSING),
            score: record
                .score
                .map(|s| format!("{}%", s.round()))
                .unwrap_or_else(|| MISSING.to_string()),
            keywords: if record.matched_keywords.is_empty() {
                "None".to_string()
            } else {
                record.matched_keywords.join(", ")
            },
            has_file: data.stored_file().is_some(),
        }
    }
}

/// Everything the preview modal needs for one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumePreview {
    pub file_url: Option<String>,
    pub original_url: Option<String>,
    pub keywords: Vec<String>,
    pub experience: Option<Value>,
    pub department: Option<String>,
    pub resume_text: String,
    pub highlighted_text: String,
}

impl ResumePreview {
    /// Highlights the record's matched keywords followed by the active tags.
    pub fn build(record: &ResultRecord, active_tags: &[String], backend: &dyn ResumeBackend) -> Self {
        let data: &ResumeData = &record.data;
        let keywords: Vec<String> = record
            .matched_keywords
            .iter()
            .chain(active_tags.iter())
            .cloned()
            .collect();
        let resume_text = data.resume_text.clone().unwrap_or_default();
        let highlighted_text = highlight_keywords(&resume_text, &keywords);

        Self {
            file_url: data.stored_file().map(|url| backend.proxy_url(url)),
            original_url: data.stored_file().map(str::to_string),
            keywords,
            experience: data.experience_years.clone(),
            department: data.department.clone(),
            resume_text,
            highlighted_text,
        }
    }
}

/// HTML fragment of `text` with every case-insensitive occurrence of any
/// keyword wrapped in `<mark>`. Keywords are matched literally; earlier
/// keywords win on overlap. All resume text is escaped, so the only markup
/// in the output is the `<mark>` tags.
pub fn highlight_keywords(text: &str, keywords: &[String]) -> String {
    let escaped: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if text.is_empty() || escaped.is_empty() {
        return escape_html(text);
    }

    let pattern = escaped.join("|");
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            warn!("Highlight pattern rejected: {e}");
            return escape_html(text);
        }
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in re.find_iter(text) {
        out.push_str(&escape_html(&text[last..found.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(found.as_str()));
        out.push_str("</mark>");
        last = found.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Plain text of a scalar JSON value; `None` for null, empty, zero or false.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
