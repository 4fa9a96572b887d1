/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through the `TextGenerator` trait.
///
/// One prompt in, one text out. No retries, no streaming, no client-side timeout:
/// a failed call surfaces to the caller and the user resubmits.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model preference, most capable first. The last entry is the baseline.
pub const DEFAULT_MODEL_PREFERENCE: &[&str] = &["gemini-1.5-pro", "gemini-1.5-flash"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text-in/text-out seam over the remote model. `AppState` carries an
/// `Arc<dyn TextGenerator>` so handlers never see the transport.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt and returns the generated text verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Name of the model serving requests.
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: SystemInstruction<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client pinned to one model for its lifetime.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl LlmClient {
    /// Builds a client and pins the first model in `preference` the API reports
    /// as available. Falls back to the last (baseline) entry when none answer.
    /// The preference list is consulted once, here, and never per call.
    pub async fn connect(
        api_key: String,
        api_base: String,
        preference: &[String],
    ) -> anyhow::Result<Self> {
        let baseline = preference
            .last()
            .ok_or_else(|| anyhow::anyhow!("model preference list is empty"))?;

        let mut client = Self {
            client: Client::builder().build()?,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: baseline.clone(),
        };

        for candidate in preference {
            match client.probe_model(candidate).await {
                Ok(()) => {
                    info!("Pinned preferred model {candidate}");
                    client.model = candidate.clone();
                    return Ok(client);
                }
                Err(e) => warn!("Model {candidate} unavailable: {e}"),
            }
        }

        warn!("No preferred model answered; using baseline {baseline}");
        Ok(client)
    }

    async fn probe_model(&self, model: &str) -> Result<(), LlmError> {
        let response = self
            .client
            .get(format!("{}/models/{model}", self.api_base))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), body))
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part { text: system }],
            },
        };

        debug!("Calling {} with prompt of {} chars", self.model, prompt.len());

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.api_base, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, prompts::ANALYST_SYSTEM).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pulls the message out of a Gemini error envelope, falling back to the raw body.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let json = r###"{
            "candidates": [
                {"content": {"parts": [{"text": "## 1. MATCH"}, {"text": " SCORE\n82%"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }"###;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("## 1. MATCH SCORE\n82%"));
        assert_eq!(parsed.usage_metadata.unwrap().candidates_token_count, 4);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_api_error_extracts_message() {
        let body = r#"{"error": {"code": 404, "message": "models/x is not found", "status": "NOT_FOUND"}}"#;
        match api_error(404, body.to_string()) {
            LlmError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "models/x is not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        match api_error(500, "upstream exploded".to_string()) {
            LlmError::Api { message, .. } => assert_eq!(message, "upstream exploded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hello" }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part { text: "sys" }],
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_preference() {
        let result = LlmClient::connect("key".into(), DEFAULT_API_BASE.into(), &[]).await;
        assert!(result.is_err());
    }
}
