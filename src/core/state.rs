//! Shared workflow state and the partial updates steps hand back.
//!
//! A [`BlogState`] is created once per run, snapshotted for every step and
//! merged with the [`StateUpdate`] that step returns. Merging replaces whole
//! top-level keys: a `blog` in the update overwrites the entire `blog` of the
//! state, keys missing from the update are left untouched.

use serde::{Deserialize, Deserializer, Serialize};

/// Title and body of the post being written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BlogContent {
    /// A blog carrying a title only, as produced by title creation.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// The title, or `""` when none has been written yet.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// The body, or `""` when none has been written yet.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// State threaded through one blog-generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogContent>,
}

impl BlogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.current_language = Some(language.into());
        self
    }

    pub fn with_blog(mut self, blog: BlogContent) -> Self {
        self.blog = Some(blog);
        self
    }

    /// The topic, `""` when absent.
    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or_default()
    }

    pub fn current_language(&self) -> Option<&str> {
        self.current_language.as_deref()
    }

    /// `blog.title`, `""` when either level is missing.
    pub fn title(&self) -> &str {
        self.blog.as_ref().map(BlogContent::title).unwrap_or_default()
    }

    /// `blog.content`, `""` when either level is missing.
    pub fn content(&self) -> &str {
        self.blog.as_ref().map(BlogContent::content).unwrap_or_default()
    }

    /// Folds a step's update into this state.
    pub fn merge(&mut self, update: StateUpdate) {
        if let Some(blog) = update.blog {
            self.blog = Some(blog);
        }
        if let Some(language) = update.current_language {
            self.current_language = language;
        }
    }
}

/// Partial update returned by a step.
///
/// `current_language` is doubly optional so that a pass-through of an absent
/// language (`Some(None)`, serialized as `null`) stays distinguishable from
/// "this update does not touch the language" (`None`, key omitted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogContent>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_language: Option<Option<String>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl StateUpdate {
    /// The no-op update.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn blog(blog: BlogContent) -> Self {
        Self {
            blog: Some(blog),
            current_language: None,
        }
    }

    pub fn language(language: Option<String>) -> Self {
        Self {
            blog: None,
            current_language: Some(language),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blog.is_none() && self.current_language.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_read_as_empty() {
        let state = BlogState::new();
        assert_eq!(state.topic(), "");
        assert_eq!(state.title(), "");
        assert_eq!(state.content(), "");
        assert_eq!(state.current_language(), None);

        let state: BlogState = serde_json::from_value(json!({ "blog": {} })).unwrap();
        assert_eq!(state.title(), "");
        assert_eq!(state.content(), "");
    }

    #[test]
    fn test_merge_replaces_blog_wholesale() {
        let mut state = BlogState::new()
            .with_topic("rust")
            .with_blog(BlogContent::new("Old", "old body"));

        state.merge(StateUpdate::blog(BlogContent::titled("New")));

        assert_eq!(state.title(), "New");
        assert_eq!(state.content(), "");
        assert_eq!(state.topic(), "rust");
    }

    #[test]
    fn test_merge_leaves_untouched_keys() {
        let mut state = BlogState::new()
            .with_language("french")
            .with_blog(BlogContent::new("T", "C"));
        let before = state.clone();

        state.merge(StateUpdate::empty());
        assert_eq!(state, before);

        state.merge(StateUpdate::blog(BlogContent::new("T", "traduit")));
        assert_eq!(state.current_language(), Some("french"));
    }

    #[test]
    fn test_merge_language_update() {
        let mut state = BlogState::new().with_language("hindi");
        state.merge(StateUpdate::language(Some("french".to_string())));
        assert_eq!(state.current_language(), Some("french"));

        state.merge(StateUpdate::language(None));
        assert_eq!(state.current_language(), None);
    }

    #[test]
    fn test_update_wire_shape() {
        let title_only = StateUpdate::blog(BlogContent::titled("Hello"));
        assert_eq!(
            serde_json::to_value(&title_only).unwrap(),
            json!({ "blog": { "title": "Hello" } })
        );

        let pass_through = StateUpdate::language(None);
        assert_eq!(
            serde_json::to_value(&pass_through).unwrap(),
            json!({ "current_language": null })
        );

        assert_eq!(serde_json::to_value(StateUpdate::empty()).unwrap(), json!({}));
    }

    #[test]
    fn test_update_null_language_round_trips() {
        let update: StateUpdate =
            serde_json::from_value(json!({ "current_language": null })).unwrap();
        assert_eq!(update.current_language, Some(None));
        assert!(!update.is_empty());

        let update: StateUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.is_empty());
    }
}
