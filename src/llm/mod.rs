//! LLM collaborator boundary.
//!
//! Steps only see the synchronous [`LlmClient`] trait. The HTTP providers
//! (Ollama and the OpenAI-compatible DeepSeek API) live behind the `llm`
//! feature and are exposed through the blocking [`Client`]; [`MockLlm`] is
//! always available for tests and offline runs.

pub mod error;
pub mod mock;
pub mod response;
pub mod schema;

#[cfg(feature = "llm")]
pub mod client;
#[cfg(feature = "llm")]
pub mod deepseek;
#[cfg(feature = "llm")]
pub mod ollama;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use error::LLMError;
pub use mock::{MockCall, MockLlm};
pub use response::{Blog, LlmResponse, normalize};
pub use schema::{Field, Schema};

#[cfg(feature = "llm")]
pub use client::{Client, ProviderConfig};
#[cfg(feature = "llm")]
pub use deepseek::DeepSeekConfig;
#[cfg(feature = "llm")]
pub use ollama::OllamaConfig;

/// A message in chat format, shared by every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// What a step sends to the model: a single prompt string or a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Text(String),
    Messages(Vec<ChatMessage>),
}

impl Prompt {
    /// The prompt as chat messages; a bare string becomes one user message.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        match self {
            Prompt::Text(text) => vec![ChatMessage::user(text.clone())],
            Prompt::Messages(messages) => messages.clone(),
        }
    }

    /// Total characters sent, for logging.
    pub fn char_count(&self) -> usize {
        match self {
            Prompt::Text(text) => text.chars().count(),
            Prompt::Messages(messages) => messages.iter().map(|m| m.content.chars().count()).sum(),
        }
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Text(text)
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Text(text.to_string())
    }
}

impl From<Vec<ChatMessage>> for Prompt {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Prompt::Messages(messages)
    }
}

/// Synchronous LLM client used by the workflow steps.
pub trait LlmClient: Send + Sync {
    /// One blocking completion for `prompt`.
    fn invoke(&self, prompt: &Prompt) -> Result<LlmResponse, LLMError>;

    /// One blocking completion asked to answer in the shape of `schema`.
    ///
    /// Clients without structured-output support keep this default.
    fn invoke_structured(&self, _prompt: &Prompt, _schema: &Schema) -> Result<LlmResponse, LLMError> {
        Err(LLMError::StructuredOutputUnsupported)
    }
}

impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    fn invoke(&self, prompt: &Prompt) -> Result<LlmResponse, LLMError> {
        (**self).invoke(prompt)
    }

    fn invoke_structured(&self, prompt: &Prompt, schema: &Schema) -> Result<LlmResponse, LLMError> {
        (**self).invoke_structured(prompt, schema)
    }
}
