//! # blogflow
//!
//! A small synchronous workflow that writes a blog post with an LLM: it
//! creates a title, generates the body, and optionally translates the body
//! into Hindi or French depending on the state's language.
//!
//! ## Features
//!
//! - **Typed state**: [`BlogState`] in, [`StateUpdate`] out, merged by the flow
//! - **Shape-agnostic responses**: every LLM answer goes through [`LlmResponse::to_text`]
//! - **Pluggable LLM**: anything implementing [`LlmClient`]; [`MockLlm`] for tests
//! - **HTTP providers** (feature `llm`): Ollama and DeepSeek behind a blocking [`Client`]
//!
//! ## Quick Start
//!
//! ```rust
//! use blogflow::prelude::*;
//! use std::sync::Arc;
//!
//! let llm = Arc::new(
//!     MockLlm::new()
//!         .push_response("Why Cats Rule the Internet")
//!         .push_response("## Cats\nThey just do."),
//! );
//! let flow = topic_flow(llm);
//!
//! let mut state = BlogState::new().with_topic("cats");
//! flow.run(&mut state).unwrap();
//! assert_eq!(state.title(), "Why Cats Rule the Internet");
//! ```
//!
//! ## Module Organization
//!
//! - [`core`](crate::core): state, errors, the node/flow engine and telemetry
//! - [`blog`]: prompts, steps, nodes and prebuilt flows
//! - [`llm`]: the client trait, response normalization and providers
//! - [`config`]: environment-driven configuration

// ============================================================================
// Modules
// ============================================================================

pub mod blog;
pub mod config;
pub mod core;
pub mod llm;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use crate::core::error::BlogError;
pub use crate::core::state::{BlogContent, BlogState, StateUpdate};
pub use crate::core::sync_impl::flow::Flow;
pub use crate::core::sync_impl::node::{DEFAULT_ACTION, Node, NodeCore, NodeLogic};
pub use crate::core::telemetry::{MemoryTelemetry, Telemetry, TraceEntry};

pub use blog::graph::{language_flow, topic_flow};
pub use blog::nodes::{ContentGenerationNode, RouteNode, TitleCreationNode, TranslationNode};
pub use blog::steps::{BlogNode, route, route_decision};

pub use config::{BlogConfig, ConfigError, ProviderKind};

pub use llm::{
    Blog, ChatMessage, LLMError, LlmClient, LlmResponse, MockLlm, Prompt, Schema, normalize,
};

#[cfg(feature = "llm")]
pub use llm::Client;

// ============================================================================
// Prelude
// ============================================================================

/// Everything needed to build and run a blog flow.
///
/// # Example
/// ```rust
/// use blogflow::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        BlogConfig, BlogContent, BlogError, BlogNode, BlogState, ChatMessage, Flow, LlmClient,
        LlmResponse, MockLlm, Node, NodeLogic, Prompt, StateUpdate, language_flow, route,
        route_decision, topic_flow,
    };

    #[cfg(feature = "llm")]
    pub use super::Client;
}

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
