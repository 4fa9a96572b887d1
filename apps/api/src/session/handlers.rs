use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::presenter::{parse_match_score, present, Dashboard};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRecord, HistorySummary};
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistorySummary>,
    pub current: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub index: usize,
    pub record: AnalysisRecord,
    pub dashboard: Dashboard,
}

#[derive(Debug, Serialize)]
pub struct HistoryDeletedResponse {
    pub removed: usize,
    pub remaining: usize,
    pub current: Option<usize>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse { session_id }),
    )
}

/// DELETE /api/v1/sessions/:session_id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:session_id/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();
    Ok(Json(summarize(&session)))
}

/// GET /api/v1/sessions/:session_id/current
pub async fn handle_current(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryEntryResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    if session.history().is_empty() {
        return Err(AppError::NotFound(
            "No analyses in this session yet".to_string(),
        ));
    }
    let (index, record) = session
        .current()
        .ok_or_else(|| AppError::NotFound("No analysis selected in this session".to_string()))?;
    Ok(Json(entry_response(index, record)))
}

/// POST /api/v1/sessions/:session_id/history/:index/load
pub async fn handle_load_entry(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<HistoryEntryResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let record = session.select(index)?;
    Ok(Json(entry_response(index, record)))
}

/// DELETE /api/v1/sessions/:session_id/history/:index
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<HistoryDeletedResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    session.remove(index)?;
    Ok(Json(HistoryDeletedResponse {
        removed: index,
        remaining: session.history().len(),
        current: session.current_index(),
    }))
}

fn entry_response(index: usize, record: &AnalysisRecord) -> HistoryEntryResponse {
    HistoryEntryResponse {
        index,
        dashboard: present(&record.result_markdown),
        record: record.clone(),
    }
}

fn summarize(session: &Session) -> HistoryResponse {
    let current = session.current_index();
    let entries = session
        .history()
        .iter()
        .enumerate()
        .map(|(index, record)| HistorySummary {
            index,
            job_title: record.job_title.clone(),
            timestamp: record.timestamp,
            match_score: parse_match_score(&record.result_markdown),
            is_current: current == Some(index),
        })
        .collect();

    HistoryResponse { entries, current }
}
