//! Blocking LLM client over the HTTP providers.
//!
//! Provider calls are async (reqwest); the client owns a current-thread tokio
//! runtime and blocks on each call so the workflow steps stay synchronous.
//! Do not call it from inside another tokio runtime: `block_on` would panic.

use tokio::runtime::{Builder, Runtime};

use crate::config::{BlogConfig, ProviderKind};
use crate::llm::deepseek::{self, DeepSeekConfig};
use crate::llm::ollama::{self, OllamaConfig};
use crate::llm::{ChatMessage, LLMError, LlmClient, LlmResponse, Prompt, Schema};

/// The provider a [`Client`] talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderConfig {
    Ollama(OllamaConfig),
    DeepSeek(DeepSeekConfig),
}

impl ProviderConfig {
    pub fn default_model(&self) -> &str {
        match self {
            ProviderConfig::Ollama(config) => &config.default_model,
            ProviderConfig::DeepSeek(config) => &config.default_model,
        }
    }
}

/// LLM client wrapper around reqwest::Client
pub struct Client {
    http: reqwest::Client,
    provider: ProviderConfig,
    model: Option<String>,
    runtime: Runtime,
}

impl Client {
    pub fn new(provider: ProviderConfig) -> Result<Self, LLMError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Client {
            http: reqwest::Client::new(),
            provider,
            model: None,
            runtime,
        })
    }

    /// Ollama on the default host (http://localhost:11434)
    pub fn ollama() -> Result<Self, LLMError> {
        Self::new(ProviderConfig::Ollama(OllamaConfig::default()))
    }

    /// DeepSeek with API key and default base URL
    pub fn deepseek(api_key: impl Into<String>) -> Result<Self, LLMError> {
        Self::new(ProviderConfig::DeepSeek(DeepSeekConfig {
            api_key: api_key.into(),
            ..Default::default()
        }))
    }

    /// Builds the client described by `config`.
    pub fn from_config(config: &BlogConfig) -> Result<Self, LLMError> {
        let provider = match config.provider {
            ProviderKind::Ollama => {
                let mut ollama = OllamaConfig::default();
                if let Some(host) = &config.host {
                    ollama.host = host.clone();
                }
                ProviderConfig::Ollama(ollama)
            }
            ProviderKind::DeepSeek => {
                let api_key = config.api_key.clone().ok_or_else(|| {
                    LLMError::ProviderNotConfigured("DeepSeek requires an API key".to_string())
                })?;
                let mut deepseek = DeepSeekConfig {
                    api_key,
                    ..Default::default()
                };
                if let Some(host) = &config.host {
                    deepseek.base_url = host.clone();
                }
                ProviderConfig::DeepSeek(deepseek)
            }
        };

        let mut client = Self::new(provider)?;
        client.model = config.model.clone();
        Ok(client)
    }

    /// Overrides the provider's default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// The model requests are sent to.
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        json_mode: bool,
    ) -> Result<ChatMessage, LLMError> {
        let model = self.model_name();
        match &self.provider {
            ProviderConfig::Ollama(config) => {
                ollama::chat(&self.http, config, model, messages, json_mode).await
            }
            ProviderConfig::DeepSeek(config) => {
                deepseek::chat(&self.http, config, model, messages, json_mode).await
            }
        }
    }

    fn complete_blocking(
        &self,
        messages: &[ChatMessage],
        json_mode: bool,
    ) -> Result<ChatMessage, LLMError> {
        log::debug!(
            "Sending {} message(s) to {} (json_mode: {})",
            messages.len(),
            self.model_name(),
            json_mode
        );
        self.runtime.block_on(self.complete(messages, json_mode))
    }
}

impl LlmClient for Client {
    fn invoke(&self, prompt: &Prompt) -> Result<LlmResponse, LLMError> {
        let reply = self.complete_blocking(&prompt.to_messages(), false)?;
        Ok(LlmResponse::Message(reply))
    }

    fn invoke_structured(&self, prompt: &Prompt, schema: &Schema) -> Result<LlmResponse, LLMError> {
        let mut messages = vec![ChatMessage::system(schema.instruction())];
        messages.extend(prompt.to_messages());

        let reply = self.complete_blocking(&messages, true)?;
        let response = LlmResponse::from_structured_json(&reply.content).map_err(|e| {
            LLMError::InvalidResponse(format!("{} output does not match: {}", schema.name, e))
        })?;
        schema.check(&response)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_ollama() {
        let client = Client::ollama().unwrap();
        assert_eq!(
            client.provider(),
            &ProviderConfig::Ollama(OllamaConfig::default())
        );
        assert_eq!(client.model_name(), "llama3.1");

        let client = client.with_model("phi4");
        assert_eq!(client.model_name(), "phi4");
    }

    #[test]
    fn test_with_deepseek() {
        let client = Client::deepseek("test-key").unwrap();
        match client.provider() {
            ProviderConfig::DeepSeek(config) => {
                assert_eq!(config.api_key, "test-key");
                assert_eq!(config.base_url, "https://api.deepseek.com");
            }
            other => panic!("unexpected provider {:?}", other),
        }
        assert_eq!(client.model_name(), "deepseek-chat");
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let config = BlogConfig {
            provider: ProviderKind::DeepSeek,
            model: Some("deepseek-reasoner".to_string()),
            host: Some("https://proxy.example".to_string()),
            api_key: Some("k".to_string()),
            default_language: None,
        };
        let client = Client::from_config(&config).unwrap();
        assert_eq!(client.model_name(), "deepseek-reasoner");
        match client.provider() {
            ProviderConfig::DeepSeek(deepseek) => assert_eq!(deepseek.base_url, "https://proxy.example"),
            other => panic!("unexpected provider {:?}", other),
        }

        let ollama = Client::from_config(&BlogConfig {
            host: Some("http://gpu-box:11434".to_string()),
            ..BlogConfig::default()
        })
        .unwrap();
        match ollama.provider() {
            ProviderConfig::Ollama(config) => assert_eq!(config.host, "http://gpu-box:11434"),
            other => panic!("unexpected provider {:?}", other),
        }
    }

    #[test]
    fn test_from_config_without_key_fails() {
        let config = BlogConfig {
            provider: ProviderKind::DeepSeek,
            ..BlogConfig::default()
        };
        assert!(matches!(
            Client::from_config(&config),
            Err(LLMError::ProviderNotConfigured(_))
        ));
    }
}
