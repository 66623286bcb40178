//! Ready-made blog flows.

use std::sync::Arc;

use crate::blog::nodes::{ContentGenerationNode, RouteNode, TitleCreationNode, TranslationNode};
use crate::blog::steps::{BlogNode, FRENCH, HINDI};
use crate::core::sync_impl::flow::Flow;
use crate::core::sync_impl::node::Node;
use crate::llm::LlmClient;

/// title_creation -> content_generation
pub fn topic_flow(llm: Arc<dyn LlmClient>) -> Flow {
    let blog = BlogNode::new(llm);
    let content = Node::new(ContentGenerationNode::new(blog.clone()));
    let title = Node::new(TitleCreationNode::new(blog)).next(content);
    Flow::new(title)
}

/// title_creation -> content_generation -> route, then `hindi_translation`
/// or `french_translation` depending on the route decision. Any other
/// decision ends the run with the untranslated post.
pub fn language_flow(llm: Arc<dyn LlmClient>) -> Flow {
    let blog = BlogNode::new(llm);

    let route = Node::new(RouteNode)
        .next_on(HINDI, Node::new(TranslationNode::for_language(blog.clone(), HINDI)))
        .next_on(FRENCH, Node::new(TranslationNode::for_language(blog.clone(), FRENCH)));
    let content = Node::new(ContentGenerationNode::new(blog.clone())).next(route);
    let title = Node::new(TitleCreationNode::new(blog)).next(content);

    Flow::new(title)
}
