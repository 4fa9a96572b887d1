//! Resume Rewriter: model-generated rewrite of a resume plus its exports.

use tracing::info;

use crate::analysis::prompts::rewrite_prompt;
use crate::errors::AppError;
use crate::layout::render_text_pdf;
use crate::llm_client::{LlmError, TextGenerator};
use crate::session::Session;

/// Asks the model for a full rewrite of `original_resume` guided by `analysis`.
pub async fn rewrite(
    llm: &dyn TextGenerator,
    analysis: &str,
    original_resume: &str,
) -> Result<String, LlmError> {
    let prompt = rewrite_prompt(original_resume, analysis);
    let text = llm.generate(&prompt).await?;
    Ok(text.trim().to_string())
}

/// Rewrites the resume of the entry at `index` and stores the result on it.
pub async fn generate_rewrite(
    session: &mut Session,
    index: usize,
    llm: &dyn TextGenerator,
) -> Result<String, AppError> {
    let record = session.history().get(index)?;
    let text = rewrite(llm, &record.result_markdown, &record.resume_text).await?;

    session.record_mut(index)?.rewritten_resume = Some(text.clone());
    info!("Rewritten resume generated for history entry {index}");
    Ok(text)
}

/// The stored rewrite for `index`, if one was generated.
pub fn rewritten_text(session: &Session, index: usize) -> Result<String, AppError> {
    session
        .history()
        .get(index)?
        .rewritten_resume
        .clone()
        .ok_or_else(|| {
            AppError::NotFound(format!("No rewritten resume for history entry {index}"))
        })
}

/// Renders rewritten text as a PDF off the async runtime.
pub async fn render_pdf(text: String) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || render_text_pdf(&text))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Internal(e.into()))
}
