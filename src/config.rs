//! Runtime configuration read from the environment.

use std::str::FromStr;
use thiserror::Error;

use crate::core::state::BlogState;

pub const PROVIDER_VAR: &str = "BLOGFLOW_PROVIDER";
pub const MODEL_VAR: &str = "BLOGFLOW_MODEL";
pub const HOST_VAR: &str = "BLOGFLOW_HOST";
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
pub const LANGUAGE_VAR: &str = "BLOGFLOW_LANGUAGE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown LLM provider '{0}' (use ollama or deepseek)")]
    UnknownProvider(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),
}

/// Which HTTP provider backs the LLM client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Ollama,
    DeepSeek,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Settings for one blog-generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogConfig {
    pub provider: ProviderKind,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    /// Overrides the provider's default host / base URL.
    pub host: Option<String>,
    pub api_key: Option<String>,
    /// Language the run starts with; `None` leaves it unset.
    pub default_language: Option<String>,
}

impl BlogConfig {
    /// Reads the `BLOGFLOW_*` and `DEEPSEEK_API_KEY` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get(PROVIDER_VAR) {
            Some(raw) => raw.parse()?,
            None => ProviderKind::default(),
        };
        let api_key = get(API_KEY_VAR);
        if provider == ProviderKind::DeepSeek && api_key.is_none() {
            return Err(ConfigError::MissingApiKey(API_KEY_VAR));
        }

        Ok(Self {
            provider,
            model: get(MODEL_VAR),
            host: get(HOST_VAR),
            api_key,
            default_language: get(LANGUAGE_VAR),
        })
    }

    /// A fresh state for `topic`, seeded with the configured language.
    pub fn initial_state(&self, topic: impl Into<String>) -> BlogState {
        let state = BlogState::new().with_topic(topic);
        match &self.default_language {
            Some(language) => state.with_language(language.clone()),
            None => state,
        }
    }
}
