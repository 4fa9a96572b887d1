//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::orchestrator::{run_analysis, AnalysisInput};
use crate::analysis::presenter::{present, Dashboard};
use crate::analysis::rewriter::{generate_rewrite, render_pdf, rewritten_text};
use crate::analysis::skills::{generate_skill_table, normalize_skills, DEFAULT_SKILLS};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub index: usize,
    pub record: AnalysisRecord,
    pub dashboard: Dashboard,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DefaultSkillsResponse {
    pub skills: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SkillTableResponse {
    pub index: usize,
    pub skill_table: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub index: usize,
    pub rewritten_resume: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills/defaults
pub async fn handle_default_skills() -> Json<DefaultSkillsResponse> {
    Json(DefaultSkillsResponse {
        skills: DEFAULT_SKILLS.to_vec(),
    })
}

/// POST /api/v1/sessions/:session_id/analyses
///
/// Multipart form: `job_title`, `job_description`, `key_skills` (repeatable,
/// comma-separated allowed) and the `resume` file.
pub async fn handle_submit_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let input = read_analysis_form(multipart).await?;

    let mut session = handle.lock().await;
    session.touch();

    let outcome = run_analysis(
        &mut session,
        state.extractor.clone(),
        state.llm.as_ref(),
        input,
    )
    .await?;

    Ok(Json(AnalysisResponse {
        index: outcome.index,
        dashboard: present(&outcome.record.result_markdown),
        record: outcome.record,
        warnings: outcome.warnings,
    }))
}

/// POST /api/v1/sessions/:session_id/history/:index/skills
pub async fn handle_skill_table(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SkillTableResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let skill_table = generate_skill_table(&mut session, index, state.llm.as_ref()).await?;
    Ok(Json(SkillTableResponse { index, skill_table }))
}

/// POST /api/v1/sessions/:session_id/history/:index/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<RewriteResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let rewritten_resume = generate_rewrite(&mut session, index, state.llm.as_ref()).await?;
    Ok(Json(RewriteResponse {
        index,
        rewritten_resume,
    }))
}

/// GET /api/v1/sessions/:session_id/history/:index/rewrite.txt
pub async fn handle_download_text(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Response, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let text = {
        let mut session = handle.lock().await;
        session.touch();
        rewritten_text(&session, index)?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rewritten_resume.txt\"",
            ),
        ],
        text,
    )
        .into_response())
}

/// GET /api/v1/sessions/:session_id/history/:index/rewrite.pdf
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Response, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let text = {
        let mut session = handle.lock().await;
        session.touch();
        rewritten_text(&session, index)?
    };

    let pdf = render_pdf(text).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rewritten_resume.pdf\"",
            ),
        ],
        pdf,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Form parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisInput, AppError> {
    let mut input = AnalysisInput::default();
    let mut raw_skills = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_title") => input.job_title = Some(field.text().await.map_err(bad_form)?),
            Some("job_description") => {
                input.job_description = field.text().await.map_err(bad_form)?
            }
            Some("key_skills") => raw_skills.push(field.text().await.map_err(bad_form)?),
            Some("resume") => {
                let bytes = field.bytes().await.map_err(bad_form)?;
                input.document = (!bytes.is_empty()).then_some(bytes);
            }
            _ => {}
        }
    }

    input.key_skills = normalize_skills(raw_skills.iter().map(String::as_str));
    Ok(input)
}

fn bad_form(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the size limit: {e}"))
    } else {
        AppError::BadRequest(format!("Invalid form data: {e}"))
    }
}
