//! Hard Rain — line generation over an OpenAI-compatible chat API.

pub mod dto;
pub mod openai;
pub mod prompts;

pub use openai::{OpenAiConfig, OpenAiLineGenerator};
