use thiserror::Error;

use crate::llm::error::LLMError;

/// Failure of a workflow step.
///
/// Every step that talks to the LLM reports a failed call the same way; the
/// run is aborted and the failing step's update is never merged.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("LLM invocation failed in step '{step}': {source}")]
    LlmInvocationFailed {
        step: &'static str,
        source: LLMError,
    },
}

impl BlogError {
    /// Name of the step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            BlogError::LlmInvocationFailed { step, .. } => step,
        }
    }
}
