use std::sync::Arc;

use crate::config::Config;
use crate::document::ResumeExtractor;
use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client, pinned to one model at startup.
    pub llm: Arc<dyn TextGenerator>,
    /// Resume text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn ResumeExtractor>,
    /// Live interactive sessions; each owns its history and selection.
    pub sessions: SessionStore,
    pub config: Config,
}
