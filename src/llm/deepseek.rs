//! DeepSeek LLM client
//!
//! DeepSeek uses an OpenAI-compatible API, so any compatible endpoint can be
//! reached by changing `base_url`.

use serde::{Deserialize, Serialize};

use crate::llm::{ChatMessage, error::LLMError};

/// Configuration for DeepSeek client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeepSeekConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL (default: https://api.deepseek.com)
    pub base_url: String,
    /// Default model to use (default: deepseek-chat)
    pub default_model: String,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.deepseek.com".to_string(),
            default_model: "deepseek-chat".to_string(),
        }
    }
}

/// Request structure for DeepSeek chat completions
#[derive(Debug, Serialize)]
pub struct DeepSeekRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<DeepSeekResponseFormat>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct DeepSeekResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

/// Response from DeepSeek chat completions
#[derive(Debug, Deserialize)]
pub struct DeepSeekResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<DeepSeekChoice>,
    #[serde(default)]
    pub usage: Option<DeepSeekUsage>,
}

#[derive(Debug, Deserialize)]
pub struct DeepSeekChoice {
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeepSeekUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Calls `/v1/chat/completions` once and returns the first choice.
pub(crate) async fn chat(
    http: &reqwest::Client,
    config: &DeepSeekConfig,
    model: &str,
    messages: &[ChatMessage],
    json_mode: bool,
) -> Result<ChatMessage, LLMError> {
    let request = DeepSeekRequest {
        model,
        messages,
        response_format: json_mode.then_some(DeepSeekResponseFormat {
            format_type: "json_object",
        }),
        stream: false,
    };

    let response = http
        .post(format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        ))
        .bearer_auth(&config.api_key)
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        log::error!("DeepSeek chat call failed with HTTP {}", status);
        return Err(LLMError::DeepSeekError(format!("HTTP {}: {}", status, error_text)));
    }

    let deepseek_response: DeepSeekResponse = response.json().await?;
    if let Some(usage) = &deepseek_response.usage {
        log::debug!(
            "DeepSeek {} ({}) used {} tokens",
            deepseek_response.model,
            deepseek_response.id,
            usage.total_tokens
        );
    }
    first_message(deepseek_response)
}

fn first_message(response: DeepSeekResponse) -> Result<ChatMessage, LLMError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| LLMError::InvalidResponse("No choices in response".to_string()))
}
