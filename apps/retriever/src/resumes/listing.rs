use serde::Serialize;

use crate::backend::models::ResumeData;
use crate::backend::ResumeBackend;
use crate::retrieval::display::value_text;

const UNNAMED: &str = "Unnamed Candidate";
const NO_EMAIL: &str = "Not Provided";
const DASH: &str = "—";

/// One row of the "all resumes" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeListRow {
    pub name: String,
    pub email: String,
    pub experience: String,
    pub department: String,
    /// Proxy link for viewing the stored file, when there is one.
    pub view_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeListing {
    pub total: usize,
    pub resumes: Vec<ResumeListRow>,
}

pub fn build_listing(records: &[ResumeData], backend: &dyn ResumeBackend) -> ResumeListing {
    let resumes: Vec<ResumeListRow> = records
        .iter()
        .map(|data| ResumeListRow {
            name: or_placeholder(data.candidate_name.as_deref(), UNNAMED),
            email: or_placeholder(data.email.as_deref(), NO_EMAIL),
            experience: data
                .experience_years
                .as_ref()
                .and_then(value_text)
                .map(|years| format!("{years} years"))
                .unwrap_or_else(|| DASH.to_string()),
            department: or_placeholder(data.department.as_deref(), DASH),
            view_url: data.stored_file().map(|url| backend.proxy_url(url)),
        })
        .collect();

    ResumeListing {
        total: resumes.len(),
        resumes,
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}
