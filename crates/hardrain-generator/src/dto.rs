//! Wire types for the chat completions endpoint.

use serde::{Deserialize, Serialize};

/// A chat completions request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Forces a JSON object reply.
    pub response_format: ResponseFormat,
}

/// One chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// `system` or `user`.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

/// Requested response format.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Always `json_object` here.
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    /// A JSON object response.
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

/// A chat completions response. Only the fields read here are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message.
    pub message: ChatResponseMessage,
}

/// The assistant message of a completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    /// Message text; absent for refusals and tool calls.
    #[serde(default)]
    pub content: Option<String>,
}
