//! Workflow nodes wrapping the blog steps.

use crate::blog::steps::{
    self, BlogNode, CONTENT_GENERATION, ROUTE, TITLE_CREATION, TRANSLATION,
};
use crate::core::error::BlogError;
use crate::core::state::{BlogState, StateUpdate};
use crate::core::sync_impl::node::NodeLogic;

#[derive(Clone)]
pub struct TitleCreationNode {
    blog: BlogNode,
}

impl TitleCreationNode {
    pub fn new(blog: BlogNode) -> Self {
        Self { blog }
    }
}

impl NodeLogic for TitleCreationNode {
    fn name(&self) -> &str {
        TITLE_CREATION
    }

    fn exec(&self, input: BlogState) -> Result<StateUpdate, BlogError> {
        self.blog.title_creation(&input)
    }

    fn clone_box(&self) -> Box<dyn NodeLogic> {
        Box::new(self.clone())
    }
}

#[derive(Clone)]
pub struct ContentGenerationNode {
    blog: BlogNode,
}

impl ContentGenerationNode {
    pub fn new(blog: BlogNode) -> Self {
        Self { blog }
    }
}

impl NodeLogic for ContentGenerationNode {
    fn name(&self) -> &str {
        CONTENT_GENERATION
    }

    fn exec(&self, input: BlogState) -> Result<StateUpdate, BlogError> {
        self.blog.content_generation(&input)
    }

    fn clone_box(&self) -> Box<dyn NodeLogic> {
        Box::new(self.clone())
    }
}

/// Translation node, optionally pinned to one language.
///
/// A pinned node translates into its own language whatever the state says,
/// and records that language in the update.
#[derive(Clone)]
pub struct TranslationNode {
    blog: BlogNode,
    language: Option<String>,
    name: String,
}

impl TranslationNode {
    /// Translates into the state's `current_language`.
    pub fn new(blog: BlogNode) -> Self {
        Self {
            blog,
            language: None,
            name: TRANSLATION.to_string(),
        }
    }

    /// Always translates into `language`; named `<language>_translation`.
    pub fn for_language(blog: BlogNode, language: impl Into<String>) -> Self {
        let language = language.into();
        Self {
            blog,
            name: format!("{}_{}", language, TRANSLATION),
            language: Some(language),
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl NodeLogic for TranslationNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn prep(&self, state: &BlogState) -> BlogState {
        let mut snapshot = state.clone();
        if let Some(language) = &self.language {
            snapshot.current_language = Some(language.clone());
        }
        snapshot
    }

    fn exec(&self, input: BlogState) -> Result<StateUpdate, BlogError> {
        let mut update = self.blog.translation(&input)?;
        if self.language.is_some() {
            update.current_language = Some(input.current_language);
        }
        Ok(update)
    }

    fn clone_box(&self) -> Box<dyn NodeLogic> {
        Box::new(self.clone())
    }
}

/// Routing node: passes the language through and branches on it.
#[derive(Clone, Default)]
pub struct RouteNode;

impl NodeLogic for RouteNode {
    fn name(&self) -> &str {
        ROUTE
    }

    fn exec(&self, input: BlogState) -> Result<StateUpdate, BlogError> {
        Ok(steps::route(&input))
    }

    fn post(&self, state: &mut BlogState, update: StateUpdate) -> Option<String> {
        state.merge(update);
        let decision = steps::route_decision(state);
        log::debug!("{}: decision '{}'", ROUTE, decision);
        Some(decision)
    }

    fn clone_box(&self) -> Box<dyn NodeLogic> {
        Box::new(self.clone())
    }
}
