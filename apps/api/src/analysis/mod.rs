// Resume analysis: prompt templates, the analysis pipeline, result presentation,
// skill tables and rewrites.
// All LLM calls go through llm_client::TextGenerator; no direct HTTP calls here.

pub mod handlers;
pub mod orchestrator;
pub mod presenter;
pub mod prompts;
pub mod rewriter;
pub mod skills;

#[cfg(test)]
pub(crate) mod testing;
