//! The blog workflow steps.
//!
//! Each step reads a snapshot of [`BlogState`] and returns a [`StateUpdate`];
//! none of them mutates state directly. LLM failures surface as
//! [`BlogError::LlmInvocationFailed`] from every step alike.

use std::sync::Arc;

use crate::blog::prompts::{self, DEFAULT_LANGUAGE};
use crate::core::error::BlogError;
use crate::core::state::{BlogContent, BlogState, StateUpdate};
use crate::llm::{ChatMessage, LLMError, LlmClient, Prompt, Schema};

pub const TITLE_CREATION: &str = "title_creation";
pub const CONTENT_GENERATION: &str = "content_generation";
pub const TRANSLATION: &str = "translation";
pub const ROUTE: &str = "route";

/// Decision label for the Hindi branch.
pub const HINDI: &str = "hindi";
/// Decision label for the French branch.
pub const FRENCH: &str = "french";

/// The LLM-backed steps, sharing one client.
#[derive(Clone)]
pub struct BlogNode {
    llm: Arc<dyn LlmClient>,
    translation_schema: Schema,
}

impl BlogNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            translation_schema: Schema::blog(),
        }
    }

    /// Writes a title for `topic`. No-op without a topic.
    pub fn title_creation(&self, state: &BlogState) -> Result<StateUpdate, BlogError> {
        let topic = state.topic();
        if topic.is_empty() {
            log::debug!("{}: no topic, skipping", TITLE_CREATION);
            return Ok(StateUpdate::empty());
        }

        let prompt = Prompt::from(prompts::title_prompt(topic));
        let title = self
            .llm
            .invoke(&prompt)
            .map_err(|source| failed(TITLE_CREATION, source))?
            .to_text();

        log::info!("{}: generated title for '{}'", TITLE_CREATION, topic);
        Ok(StateUpdate::blog(BlogContent::titled(title)))
    }

    /// Writes the body for `topic`, carrying any existing title forward.
    /// No-op without a topic.
    pub fn content_generation(&self, state: &BlogState) -> Result<StateUpdate, BlogError> {
        let topic = state.topic();
        if topic.is_empty() {
            log::debug!("{}: no topic, skipping", CONTENT_GENERATION);
            return Ok(StateUpdate::empty());
        }

        let prompt = Prompt::from(prompts::content_prompt(topic));
        let content = self
            .llm
            .invoke(&prompt)
            .map_err(|source| failed(CONTENT_GENERATION, source))?
            .to_text();

        log::info!(
            "{}: generated {} characters for '{}'",
            CONTENT_GENERATION,
            content.chars().count(),
            topic
        );
        Ok(StateUpdate::blog(BlogContent::new(state.title(), content)))
    }

    /// Translates the body into `current_language` (default `"english"`).
    ///
    /// Empty content short-circuits without calling the LLM. A structured
    /// `Blog` answer is tried first; if that call fails the same prompt is sent
    /// as a plain completion, and only a failure of that second call is
    /// returned.
    pub fn translation(&self, state: &BlogState) -> Result<StateUpdate, BlogError> {
        let title = state.title();
        let content = state.content();
        if content.is_empty() {
            log::debug!("{}: nothing to translate", TRANSLATION);
            return Ok(StateUpdate::blog(BlogContent::new(title, "")));
        }

        let language = state.current_language().unwrap_or(DEFAULT_LANGUAGE);
        let prompt = Prompt::Messages(vec![ChatMessage::user(prompts::translation_prompt(
            language, content,
        ))]);
        log::debug!(
            "{}: translating into '{}' ({} prompt characters)",
            TRANSLATION,
            language,
            prompt.char_count()
        );

        let response = match self.llm.invoke_structured(&prompt, &self.translation_schema) {
            Ok(response) => response,
            Err(err) => {
                log::warn!(
                    "{}: structured output failed ({}), falling back to a plain call",
                    TRANSLATION,
                    err
                );
                self.llm
                    .invoke(&prompt)
                    .map_err(|source| failed(TRANSLATION, source))?
            }
        };

        log::info!("{}: translated content into '{}'", TRANSLATION, language);
        Ok(StateUpdate::blog(BlogContent::new(title, response.to_text())))
    }
}

fn failed(step: &'static str, source: LLMError) -> BlogError {
    log::error!("{}: LLM call failed: {}", step, source);
    BlogError::LlmInvocationFailed { step, source }
}

/// Pass-through of `current_language`, for the routing node.
pub fn route(state: &BlogState) -> StateUpdate {
    StateUpdate::language(state.current_language.clone())
}

/// Picks the branch label from `current_language`.
///
/// The language is trimmed and lowercased; `"hindi"` and `"french"` map to
/// their branch labels and anything else is returned as normalized, possibly
/// empty.
pub fn route_decision(state: &BlogState) -> String {
    let language = state
        .current_language()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    match language.as_str() {
        HINDI => HINDI.to_string(),
        FRENCH => FRENCH.to_string(),
        _ => language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Blog, MockCall, MockLlm};
    use serde_json::json;

    fn node(mock: &Arc<MockLlm>) -> BlogNode {
        BlogNode::new(mock.clone())
    }

    #[test]
    fn test_title_creation_without_topic_is_noop() {
        let mock = Arc::new(MockLlm::repeating("never"));
        let blog = node(&mock);

        assert!(blog.title_creation(&BlogState::new()).unwrap().is_empty());
        assert!(
            blog.title_creation(&BlogState::new().with_topic(""))
                .unwrap()
                .is_empty()
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_title_creation_normalizes_response() {
        let mock = Arc::new(MockLlm::new().push_response(json!({ "text": "Purr-fect Cats" })));
        let update = node(&mock)
            .title_creation(&BlogState::new().with_topic("cats"))
            .unwrap();

        assert_eq!(update, StateUpdate::blog(BlogContent::titled("Purr-fect Cats")));
        match &mock.calls()[0] {
            MockCall::Plain(Prompt::Text(text)) => assert!(text.contains("the cats")),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_title_creation_propagates_llm_error() {
        let mock = Arc::new(MockLlm::new().push_error("rate limited"));
        let err = node(&mock)
            .title_creation(&BlogState::new().with_topic("cats"))
            .unwrap_err();

        assert_eq!(err.step(), TITLE_CREATION);
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_content_generation_keeps_title() {
        let mock = Arc::new(MockLlm::new().push_response(ChatMessage::assistant("## Why cats rule")));
        let state = BlogState::new()
            .with_topic("cats")
            .with_blog(BlogContent::titled("Cats!"));

        let update = node(&mock).content_generation(&state).unwrap();
        let blog = update.blog.unwrap();

        assert_eq!(blog.title(), "Cats!");
        assert_eq!(blog.content(), "## Why cats rule");
    }

    #[test]
    fn test_content_generation_without_title() {
        let mock = Arc::new(MockLlm::repeating("body"));
        let update = node(&mock)
            .content_generation(&BlogState::new().with_topic("cats"))
            .unwrap();

        assert_eq!(update, StateUpdate::blog(BlogContent::new("", "body")));
        assert!(node(&mock).content_generation(&BlogState::new()).unwrap().is_empty());
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_content_generation_propagates_llm_error() {
        let mock = Arc::new(MockLlm::new());
        let err = node(&mock)
            .content_generation(&BlogState::new().with_topic("cats"))
            .unwrap_err();
        assert_eq!(err.step(), CONTENT_GENERATION);
    }

    #[test]
    fn test_translation_of_empty_content_skips_llm() {
        let mock = Arc::new(MockLlm::repeating("never"));
        let blog = node(&mock);

        let state: BlogState =
            serde_json::from_value(json!({ "blog": { "content": "" } })).unwrap();
        let update = blog.translation(&state).unwrap();
        assert_eq!(update, StateUpdate::blog(BlogContent::new("", "")));

        let titled = BlogState::new().with_blog(BlogContent::titled("Only a title"));
        let update = blog.translation(&titled).unwrap();
        assert_eq!(update, StateUpdate::blog(BlogContent::new("Only a title", "")));

        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_translation_uses_structured_output() {
        let mock = Arc::new(MockLlm::new().push_structured(Blog {
            title: "Chats".to_string(),
            content: "Les chats".to_string(),
        }));
        let state = BlogState::new()
            .with_language("french")
            .with_blog(BlogContent::new("Cats", "Cats"));

        let update = node(&mock).translation(&state).unwrap();

        assert_eq!(update, StateUpdate::blog(BlogContent::new("Cats", "Les chats")));
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            MockCall::Structured { prompt, schema } => {
                assert_eq!(schema, "Blog");
                let messages = prompt.to_messages();
                assert_eq!(messages.len(), 1);
                assert!(messages[0].content.contains("into french"));
                assert!(messages[0].content.contains("ORIGINAL CONTENT: Cats"));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_translation_falls_back_to_plain_call() {
        let mock = Arc::new(
            MockLlm::new()
                .push_structured_error("schema rejected")
                .push_response(ChatMessage::assistant("बिल्लियाँ")),
        );
        let state = BlogState::new()
            .with_language("hindi")
            .with_blog(BlogContent::new("Cats", "Cats"));

        let update = node(&mock).translation(&state).unwrap();

        assert_eq!(update.blog.unwrap().content(), "बिल्लियाँ");
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], MockCall::Structured { .. }));
        assert!(matches!(calls[1], MockCall::Plain(_)));
        assert_eq!(calls[0].prompt(), calls[1].prompt());
    }

    #[test]
    fn test_translation_defaults_to_english() {
        let mock = Arc::new(MockLlm::repeating("same"));
        let state = BlogState::new().with_blog(BlogContent::new("T", "Body"));

        node(&mock).translation(&state).unwrap();

        let prompt = mock.calls()[0].prompt().to_messages();
        assert!(prompt[0].content.contains("into english"));
    }

    #[test]
    fn test_translation_fails_when_fallback_fails() {
        let mock = Arc::new(MockLlm::new().push_error("offline"));
        let state = BlogState::new().with_blog(BlogContent::new("T", "Body"));

        let err = node(&mock).translation(&state).unwrap_err();
        assert_eq!(err.step(), TRANSLATION);
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_translation_falls_back_on_mismatched_structured_output() {
        let mock = Arc::new(
            MockLlm::new()
                .push_structured(json!({ "translated": "Bonjour" }))
                .push_response("Bonjour le monde"),
        );
        let state = BlogState::new()
            .with_language("french")
            .with_blog(BlogContent::new("Hello", "Hello world"));

        let update = node(&mock).translation(&state).unwrap();

        assert_eq!(update, StateUpdate::blog(BlogContent::new("Hello", "Bonjour le monde")));
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_route_passes_language_through() {
        let state = BlogState::new().with_language("French");
        let first = route(&state);
        let second = route(&state);

        assert_eq!(first, StateUpdate::language(Some("French".to_string())));
        assert_eq!(first, second);
        assert_eq!(route(&BlogState::new()), StateUpdate::language(None));
    }

    #[test]
    fn test_route_decision_labels() {
        let decide = |lang: &str| route_decision(&BlogState::new().with_language(lang));

        assert_eq!(decide("Hindi"), "hindi");
        assert_eq!(decide("French "), "french");
        assert_eq!(decide("  FRENCH"), "french");
        assert_eq!(decide("Spanish"), "spanish");
        assert_eq!(decide("   "), "");
        assert_eq!(route_decision(&BlogState::new()), "");
    }
}
