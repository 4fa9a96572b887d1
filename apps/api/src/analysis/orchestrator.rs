//! Analysis Orchestrator: extraction → prompt → model call → history.
//!
//! The only code path that appends to a session's history.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::presenter::parse_match_score;
use crate::analysis::prompts::analysis_prompt;
use crate::document::ResumeExtractor;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::analysis::AnalysisRecord;
use crate::session::Session;

pub const FIELD_JOB_DESCRIPTION: &str = "job_description";
pub const FIELD_RESUME: &str = "resume";

/// User-submitted inputs for one analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub job_title: Option<String>,
    pub job_description: String,
    /// Raw resume upload. `None` (or empty) means nothing was uploaded.
    pub document: Option<Bytes>,
    pub key_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub index: usize,
    pub record: AnalysisRecord,
    /// Non-fatal problems, e.g. an unreadable resume.
    pub warnings: Vec<String>,
}

/// Checks both required inputs and reports every one that is missing.
pub fn validate(input: &AnalysisInput) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if input.job_description.trim().is_empty() {
        missing.push(FIELD_JOB_DESCRIPTION);
    }
    if input.document.as_ref().map_or(true, |d| d.is_empty()) {
        missing.push(FIELD_RESUME);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::missing_fields(missing))
    }
}

/// Runs one analysis and records it in `session`.
///
/// Steps:
/// 1. validate(): both missing fields reported together
/// 2. extract resume text (failure → empty text plus a warning)
/// 3. build the analysis prompt and time the model call
/// 4. append the record and make it the current selection
///
/// On any error the session is left untouched.
pub async fn run_analysis(
    session: &mut Session,
    extractor: Arc<dyn ResumeExtractor>,
    llm: &dyn TextGenerator,
    input: AnalysisInput,
) -> Result<AnalysisOutcome, AppError> {
    validate(&input)?;

    let AnalysisInput {
        job_title,
        job_description,
        document,
        key_skills,
    } = input;
    let document = document.unwrap_or_default();

    let mut warnings = Vec::new();
    let resume_text = match tokio::task::spawn_blocking(move || extractor.extract(&document)).await
    {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Continuing analysis with empty resume text: {e}");
            warnings.push(e.to_string());
            String::new()
        }
        Err(e) => {
            warn!("Resume extraction task failed: {e}");
            warnings.push(format!("Could not read the uploaded resume: {e}"));
            String::new()
        }
    };

    let job_title = job_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let prompt = analysis_prompt(
        job_title.as_deref(),
        &job_description,
        &resume_text,
        &key_skills,
    );

    let started = Instant::now();
    let result_markdown = llm.generate(&prompt).await?;
    let elapsed_seconds = started.elapsed().as_secs_f64();

    let record = AnalysisRecord {
        job_title,
        timestamp: Utc::now(),
        job_description,
        resume_text,
        key_skills,
        result_markdown,
        elapsed_seconds,
        skill_table: None,
        rewritten_resume: None,
    };

    let index = session.record_completed(record.clone());
    info!(
        "Analysis {index} completed in {elapsed_seconds:.1}s (match score {})",
        parse_match_score(&record.result_markdown)
    );

    Ok(AnalysisOutcome {
        index,
        record,
        warnings,
    })
}
