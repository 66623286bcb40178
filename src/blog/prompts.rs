//! Prompt templates for the blog steps.

/// Target language when the state names none.
pub const DEFAULT_LANGUAGE: &str = "english";

pub fn title_prompt(topic: &str) -> String {
    format!(
        "You are an expert blog content writer. Use Markdown formatting. \
         Generate a blog title for the {topic}. This title should be creative and SEO-friendly."
    )
}

pub fn content_prompt(topic: &str) -> String {
    format!(
        "You are an expert blog writer. Use markdown formatting. \
         Generate a blog content with detailed breakdown for the {topic}"
    )
}

pub fn translation_prompt(language: &str, content: &str) -> String {
    format!(
        "Translate the following content into {language}.\n\
         - Maintain the original tone, style and formatting.\n\
         - Adapt cultural references and idioms to be appropriate for {language}.\n\n\
         ORIGINAL CONTENT: {content}\n"
    )
}
