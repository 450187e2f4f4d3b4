//! Result consolidation: the pure stage between the backend's raw result list
//! and what the console displays.
//!
//! Order matters: filter, then rank, then dedupe. Deduplication keeps the
//! first record per identity, so ranking first is what makes the survivor the
//! highest-scoring one.

use std::collections::HashSet;

use serde_json::Value;

use crate::backend::models::ResultRecord;
use crate::retrieval::filters::FilterCriteria;

/// Filters, ranks and deduplicates a raw result list.
/// Idempotent: consolidating the output again yields the same output.
pub fn consolidate(raw: Vec<ResultRecord>, filters: &FilterCriteria) -> Vec<ResultRecord> {
    // The backend already filters server-side; re-applying here keeps the
    // display correct when it does not.
    let mut records: Vec<ResultRecord> = raw
        .into_iter()
        .filter(|r| matches_filters(r, filters))
        .collect();
    rank(&mut records);
    dedupe(records)
}

pub fn matches_filters(record: &ResultRecord, filters: &FilterCriteria) -> bool {
    if let Some(wanted) = filters.experience {
        let years = record
            .data
            .experience_years
            .as_ref()
            .and_then(parse_leading_int);
        if years != Some(i64::from(wanted)) {
            return false;
        }
    }

    if let Some(department) = filters.department {
        let actual = record.data.department.as_deref().unwrap_or("");
        if !department.matches(actual) {
            return false;
        }
    }

    true
}

/// Stable sort, highest score first; a missing score counts as zero.
pub fn rank(records: &mut [ResultRecord]) {
    records.sort_by(|a, b| b.score_or_zero().total_cmp(&a.score_or_zero()));
}

/// Keeps the first record per `(candidate_name, email)`.
pub fn dedupe(records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((r.data.candidate_name.clone(), r.data.email.clone())))
        .collect()
}

/// Integer parsing with the leniency of a form field: numbers are truncated,
/// strings are read up to the first non-digit ("5 years" → 5). Anything
/// without a leading integer is `None`.
pub fn parse_leading_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, digits) = match s.as_bytes().first() {
                Some(b'-') => (-1, &s[1..]),
                Some(b'+') => (1, &s[1..]),
                _ => (1, s),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}
