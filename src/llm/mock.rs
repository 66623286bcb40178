//! Scripted LLM client for tests and offline runs.
//!
//! Plain and structured calls draw from separate queues. When the plain queue
//! runs dry the optional repeat response is served; when the structured queue
//! runs dry the call fails with [`LLMError::StructuredOutputUnsupported`], like
//! a client without structured-output support. A scripted structured response
//! that does not fit the requested schema fails with
//! [`LLMError::InvalidResponse`], as a real client would.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::llm::error::LLMError;
use crate::llm::response::LlmResponse;
use crate::llm::schema::Schema;
use crate::llm::{LlmClient, Prompt};

type Scripted = Result<LlmResponse, String>;

/// One recorded call to a [`MockLlm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Plain(Prompt),
    Structured { prompt: Prompt, schema: String },
}

impl MockCall {
    pub fn prompt(&self) -> &Prompt {
        match self {
            MockCall::Plain(prompt) | MockCall::Structured { prompt, .. } => prompt,
        }
    }
}

#[derive(Default)]
pub struct MockLlm {
    plain: Mutex<VecDeque<Scripted>>,
    structured: Mutex<VecDeque<Scripted>>,
    repeat: Option<LlmResponse>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockLlm {
    /// A mock with nothing scripted; every call fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock answering every plain call with `response`.
    pub fn repeating(response: impl Into<LlmResponse>) -> Self {
        Self {
            repeat: Some(response.into()),
            ..Self::default()
        }
    }

    /// Queues a response for the next plain call.
    pub fn push_response(self, response: impl Into<LlmResponse>) -> Self {
        lock(&self.plain).push_back(Ok(response.into()));
        self
    }

    /// Queues a failure for the next plain call.
    pub fn push_error(self, message: impl Into<String>) -> Self {
        lock(&self.plain).push_back(Err(message.into()));
        self
    }

    /// Queues a response for the next structured call.
    pub fn push_structured(self, response: impl Into<LlmResponse>) -> Self {
        lock(&self.structured).push_back(Ok(response.into()));
        self
    }

    /// Queues a failure for the next structured call.
    pub fn push_structured_error(self, message: impl Into<String>) -> Self {
        lock(&self.structured).push_back(Err(message.into()));
        self
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl LlmClient for MockLlm {
    fn invoke(&self, prompt: &Prompt) -> Result<LlmResponse, LLMError> {
        lock(&self.calls).push(MockCall::Plain(prompt.clone()));
        match lock(&self.plain).pop_front() {
            Some(scripted) => scripted.map_err(LLMError::Mock),
            None => self
                .repeat
                .clone()
                .ok_or_else(|| LLMError::Mock("no scripted response left".to_string())),
        }
    }

    fn invoke_structured(&self, prompt: &Prompt, schema: &Schema) -> Result<LlmResponse, LLMError> {
        lock(&self.calls).push(MockCall::Structured {
            prompt: prompt.clone(),
            schema: schema.name.clone(),
        });
        let response = match lock(&self.structured).pop_front() {
            Some(scripted) => scripted.map_err(LLMError::Mock)?,
            None => return Err(LLMError::StructuredOutputUnsupported),
        };
        schema.check(&response)?;
        Ok(response)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
