use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed analysis held in a session's history.
///
/// `result_markdown` is opaque model output. Nothing downstream may assume it
/// follows the requested section layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub job_title: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub job_description: String,
    /// Empty when the upload could not be read.
    pub resume_text: String,
    pub key_skills: Vec<String>,
    pub result_markdown: String,
    /// Wall-clock duration of the model call.
    pub elapsed_seconds: f64,
    /// Markdown table from the skill-match prompt, once generated.
    pub skill_table: Option<String>,
    /// Model-rewritten resume, once generated.
    pub rewritten_resume: Option<String>,
}

/// Lightweight row for history listings.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub index: usize,
    pub job_title: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub match_score: u32,
    pub is_current: bool,
}
