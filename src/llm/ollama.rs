//! Ollama chat client for local inference

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::{ChatMessage, error::LLMError};

/// Configuration for Ollama client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Ollama server URL (default: http://localhost:11434)
    pub host: String,
    /// Default model to use (default: llama3.1)
    pub default_model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            default_model: "llama3.1".to_string(),
        }
    }
}

/// Request structure for Ollama chat completions
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
}

/// Response from Ollama's chat endpoint
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub message: ChatMessage,
    pub done: bool,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: u32,
    #[serde(default)]
    pub eval_count: u32,
}

/// Calls `/api/chat` once, non-streaming. `json_mode` asks for a JSON body.
pub(crate) async fn chat(
    http: &reqwest::Client,
    config: &OllamaConfig,
    model: &str,
    messages: &[ChatMessage],
    json_mode: bool,
) -> Result<ChatMessage, LLMError> {
    let request = OllamaChatRequest {
        model,
        messages,
        stream: false,
        format: json_mode.then_some("json"),
    };

    let response = http
        .post(format!("{}/api/chat", config.host.trim_end_matches('/')))
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        log::error!("Ollama chat call failed with HTTP {}", status);
        return Err(LLMError::OllamaError(format!("HTTP {}: {}", status, error_text)));
    }

    let chat_response: OllamaChatResponse = response.json().await?;
    log::debug!(
        "Ollama {} answered in {}ns ({} prompt / {} completion tokens)",
        chat_response.model,
        chat_response.total_duration,
        chat_response.prompt_eval_count,
        chat_response.eval_count
    );
    Ok(chat_response.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::user("Test")];
        let request = OllamaChatRequest {
            model: "llama3.1",
            messages: &messages,
            stream: false,
            format: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3.1");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("format").is_none());

        let structured = OllamaChatRequest {
            format: Some("json"),
            ..request
        };
        assert_eq!(serde_json::to_value(&structured).unwrap()["format"], "json");
    }

    #[test]
    fn test_response_deserialization() {
        let body = json!({
            "model": "llama3.1",
            "created_at": "2024-05-01T10:00:00Z",
            "message": { "role": "assistant", "content": "Hi" },
            "done": true
        });

        let response: OllamaChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.message.content, "Hi");
        assert!(response.done);
        assert_eq!(response.eval_count, 0);
    }
}
