// Retrieval page: keyword tags, search dispatch and result consolidation.
// All remote work goes through the `ResumeBackend` held by the controller.

pub mod consolidate;
pub mod dictionary;
pub mod dispatch;
pub mod display;
pub mod filters;
pub mod handlers;
pub mod page;
pub mod tags;

/// Keywords offered as completions in the search box.
pub const SUGGESTIONS: [&str; 6] = ["python", "java", "cloud", "react", "ai", "sql"];
