//! LLM response shapes and their normalization to plain text.
//!
//! Providers, mocks and structured-output calls hand back differently shaped
//! values. [`LlmResponse`] enumerates them and [`LlmResponse::to_text`]
//! collapses any of them into the single string a step writes into state.
//! Normalization is total: it never fails and never panics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::llm::ChatMessage;

/// Keys probed, in priority order, when a response is a bare mapping.
pub const TEXT_KEYS: [&str; 4] = ["content", "text", "message", "summary"];

/// Typed result of a structured "Blog" request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub title: String,
    pub content: String,
}

/// Any value an LLM call may produce.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmResponse {
    /// Bare string.
    Text(String),
    /// Chat message carrying a `content` field.
    Message(ChatMessage),
    /// Untyped JSON object.
    Mapping(Map<String, Value>),
    /// Object exposing both `title` and `content`.
    Titled(Blog),
    /// Anything else, including `null`.
    Other(Value),
}

impl LlmResponse {
    /// Parses the raw body of a structured "Blog" call.
    ///
    /// Only an object with string `title` and `content` is accepted; any other
    /// JSON, or no JSON at all, is an error.
    pub fn from_structured_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Blog>(raw).map(LlmResponse::Titled)
    }

    /// Collapses the response into one string.
    ///
    /// First match wins:
    /// 1. `null` gives `""`
    /// 2. a value with a `content` field (message or titled) gives that
    ///    content when non-empty, otherwise the stringified value
    /// 3. a mapping gives the first truthy of [`TEXT_KEYS`], otherwise the
    ///    stringified mapping
    /// 4. a string is returned unchanged
    /// 5. anything else is stringified
    ///
    /// Every titled value also exposes `content`, so rule 2 always decides it
    /// and its title never reaches the output.
    pub fn to_text(&self) -> String {
        match self {
            LlmResponse::Other(Value::Null) => String::new(),
            LlmResponse::Message(message) if !message.content.is_empty() => message.content.clone(),
            LlmResponse::Message(_) => self.stringify(),
            LlmResponse::Titled(blog) if !blog.content.is_empty() => blog.content.clone(),
            LlmResponse::Titled(_) => self.stringify(),
            LlmResponse::Mapping(map) => TEXT_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|value| is_truthy(value))
                .map(value_text)
                .unwrap_or_else(|| self.stringify()),
            LlmResponse::Text(text) => text.clone(),
            LlmResponse::Other(_) => self.stringify(),
        }
    }

    /// Generic rendering used as the fallback of [`LlmResponse::to_text`].
    /// Returns `""` if the payload cannot be serialized.
    fn stringify(&self) -> String {
        let rendered = match self {
            LlmResponse::Text(text) => return text.clone(),
            LlmResponse::Other(value) => return value_text(value),
            LlmResponse::Message(message) => serde_json::to_string(message),
            LlmResponse::Mapping(map) => serde_json::to_string(map),
            LlmResponse::Titled(blog) => serde_json::to_string(blog),
        };
        rendered.unwrap_or_default()
    }
}

/// Normalizes an optional response; `None` gives `""`.
pub fn normalize(response: Option<&LlmResponse>) -> String {
    response.map(LlmResponse::to_text).unwrap_or_default()
}

impl fmt::Display for LlmResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl From<String> for LlmResponse {
    fn from(text: String) -> Self {
        LlmResponse::Text(text)
    }
}

impl From<&str> for LlmResponse {
    fn from(text: &str) -> Self {
        LlmResponse::Text(text.to_string())
    }
}

impl From<ChatMessage> for LlmResponse {
    fn from(message: ChatMessage) -> Self {
        LlmResponse::Message(message)
    }
}

impl From<Blog> for LlmResponse {
    fn from(blog: Blog) -> Self {
        LlmResponse::Titled(blog)
    }
}

impl From<Value> for LlmResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => LlmResponse::Text(text),
            Value::Object(map) => LlmResponse::Mapping(map),
            other => LlmResponse::Other(other),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
