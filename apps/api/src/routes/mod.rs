pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills/defaults", get(analysis::handle_default_skills))
        // Session lifecycle
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:session_id",
            delete(session::handle_end_session),
        )
        // Analysis
        .route(
            "/api/v1/sessions/:session_id/analyses",
            post(analysis::handle_submit_analysis),
        )
        // History
        .route(
            "/api/v1/sessions/:session_id/history",
            get(session::handle_list_history),
        )
        .route(
            "/api/v1/sessions/:session_id/current",
            get(session::handle_current),
        )
        .route(
            "/api/v1/sessions/:session_id/history/:index",
            delete(session::handle_delete_entry),
        )
        .route(
            "/api/v1/sessions/:session_id/history/:index/load",
            post(session::handle_load_entry),
        )
        // Skill table and rewrite
        .route(
            "/api/v1/sessions/:session_id/history/:index/skills",
            post(analysis::handle_skill_table),
        )
        .route(
            "/api/v1/sessions/:session_id/history/:index/rewrite",
            post(analysis::handle_rewrite),
        )
        .route(
            "/api/v1/sessions/:session_id/history/:index/rewrite.txt",
            get(analysis::handle_download_text),
        )
        .route(
            "/api/v1/sessions/:session_id/history/:index/rewrite.pdf",
            get(analysis::handle_download_pdf),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
