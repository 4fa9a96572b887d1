//! Test doubles for the model and the extractor.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::document::{DocumentReadError, ResumeExtractor};
use crate::llm_client::{LlmError, TextGenerator};

/// Records every prompt and answers with a fixed reply or a one-shot error.
pub struct ScriptedGenerator {
    reply: Option<String>,
    error: Mutex<Option<LlmError>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            error: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: None,
            error: Mutex::new(Some(error)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(self
                .error
                .lock()
                .unwrap()
                .take()
                .unwrap_or(LlmError::EmptyContent)),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Ignores the bytes and returns a fixed resume text.
pub struct FixedExtractor(pub String);

impl FixedExtractor {
    pub fn arc(text: &str) -> Arc<dyn ResumeExtractor> {
        Arc::new(FixedExtractor(text.to_string()))
    }
}

impl ResumeExtractor for FixedExtractor {
    fn extract(&self, _document: &[u8]) -> Result<String, DocumentReadError> {
        Ok(self.0.clone())
    }
}

/// Always fails as if the upload were corrupt.
pub struct FailingExtractor;

impl ResumeExtractor for FailingExtractor {
    fn extract(&self, _document: &[u8]) -> Result<String, DocumentReadError> {
        Err(DocumentReadError("invalid file header".to_string()))
    }
}
