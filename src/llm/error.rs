use thiserror::Error;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("HTTP request error: {0}")]
    HttpError(String),

    #[error("Ollama error: {0}")]
    OllamaError(String),

    #[error("DeepSeek error: {0}")]
    DeepSeekError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Structured output is not supported by this client")]
    StructuredOutputUnsupported,

    #[error("Failed to start the LLM runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Mock LLM error: {0}")]
    Mock(String),
}

#[cfg(feature = "llm")]
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}
