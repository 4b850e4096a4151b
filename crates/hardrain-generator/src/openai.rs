//! `LineGenerator` backed by an OpenAI-compatible chat completions API.

use async_trait::async_trait;
use hardrain_core::error::GenerationError;
use hardrain_core::generator::{LineGenerator, LineRequest};
use reqwest::Client;
use tracing::{debug, error, instrument};

use crate::dto::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use crate::prompts::{SYSTEM_CONTEXT, lyric_prompt, question_prompt};

/// Default chat completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Connection settings for [`OpenAiLineGenerator`].
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer token.
    pub api_key: String,
    /// Full URL of the chat completions endpoint.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiConfig {
    /// Settings with the default endpoint, model, and temperature.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Generates question and answer lines with a chat model.
///
/// Questions come back as a bare base question (`{"question": ...}`) which
/// is completed with the requested perspective's ending. Answers come back
/// as `{"lyric": ...}`.
#[derive(Debug, Clone)]
pub struct OpenAiLineGenerator {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiLineGenerator {
    /// Creates a generator with a fresh HTTP client.
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        debug!(model = %config.model, url = %config.base_url, "created line generator");
        Self {
            client: Client::new(),
            config,
        }
    }

    fn chat_request(&self, prompt: String) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_CONTEXT.to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat::json_object(),
        }
    }

    async fn complete(&self, chat_request: &ChatRequest) -> Result<ChatResponse, GenerationError> {
        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .json(chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GenerationError::Transport(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "generator API error");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "failed to parse generator response");
            GenerationError::MalformedResponse(format!("invalid JSON body: {e}"))
        })
    }
}

/// Pulls `field` out of the JSON object in the first choice's content.
///
/// # Errors
///
/// Returns `GenerationError::MalformedResponse` if there is no choice, no
/// content, the content is not a JSON object, or `field` is missing, not a
/// string, or blank.
pub fn extract_field(response: &ChatResponse, field: &str) -> Result<String, GenerationError> {
    let content = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .ok_or_else(|| GenerationError::MalformedResponse("response has no content".into()))?;

    let object: serde_json::Value = serde_json::from_str(content).map_err(|e| {
        GenerationError::MalformedResponse(format!("content is not JSON: {e}"))
    })?;

    object
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| GenerationError::MalformedResponse(format!("missing `{field}` field")))
}

#[async_trait]
impl LineGenerator for OpenAiLineGenerator {
    #[instrument(skip(self, request), fields(kind = request.kind(), model = %self.config.model))]
    async fn generate(&self, request: &LineRequest) -> Result<String, GenerationError> {
        match request {
            LineRequest::Question { perspective } => {
                let response = self.complete(&self.chat_request(question_prompt())).await?;
                let question = extract_field(&response, "question")?;
                Ok(perspective.complete(&question))
            }
            LineRequest::Answer {
                question,
                existing_lines,
            } => {
                let prompt = lyric_prompt(question, existing_lines);
                let response = self.complete(&self.chat_request(prompt)).await?;
                extract_field(&response, "lyric")
            }
        }
    }
}
