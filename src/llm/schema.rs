use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::error::LLMError;
use crate::llm::response::LlmResponse;

/// A single field of a structured-output schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub description: String,
}

impl Field {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Shape a structured LLM call is asked to answer in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the schema.
    pub fn field(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, description));
        self
    }

    /// The `Blog` shape: a title and a Markdown body.
    pub fn blog() -> Self {
        Schema::new("Blog")
            .field("title", "The title of the blog post")
            .field("content", "The main content of the blog post, in Markdown")
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Instruction appended to a prompt so the model answers with this shape.
    pub fn instruction(&self) -> String {
        let mut out = format!(
            "Respond ONLY with a valid JSON object describing a {} with the following keys:\n",
            self.name
        );
        for field in &self.fields {
            if field.description.is_empty() {
                out.push_str(&format!("- {}\n", field.name));
            } else {
                out.push_str(&format!("- {}: {}\n", field.name, field.description));
            }
        }
        out
    }

    /// Checks that a structured answer is an object carrying every field as text.
    pub fn check(&self, response: &LlmResponse) -> Result<(), LLMError> {
        let value = match response {
            LlmResponse::Titled(blog) => serde_json::to_value(blog)?,
            LlmResponse::Mapping(map) => Value::Object(map.clone()),
            other => {
                return Err(LLMError::InvalidResponse(format!(
                    "{} output is not an object: {}",
                    self.name, other
                )));
            }
        };

        match self
            .field_names()
            .find(|name| !value.get(*name).is_some_and(Value::is_string))
        {
            Some(missing) => Err(LLMError::InvalidResponse(format!(
                "{} output has no text field '{}'",
                self.name, missing
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::response::Blog;
    use serde_json::json;

    #[test]
    fn test_blog_schema_fields() {
        let schema = Schema::blog();
        assert_eq!(schema.name, "Blog");
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["title", "content"]);
    }

    #[test]
    fn test_instruction_lists_fields() {
        let instruction = Schema::blog().instruction();
        assert!(instruction.starts_with("Respond ONLY with a valid JSON object"));
        assert!(instruction.contains("- title: The title of the blog post"));
        assert!(instruction.contains("- content: "));
    }

    #[test]
    fn test_check_accepts_blog_shapes() {
        let schema = Schema::blog();
        let blog = Blog {
            title: "T".to_string(),
            content: "C".to_string(),
        };

        assert!(schema.check(&blog.into()).is_ok());
        assert!(
            schema
                .check(&json!({ "title": "T", "content": "", "extra": 1 }).into())
                .is_ok()
        );
    }

    #[test]
    fn test_check_rejects_other_shapes() {
        let schema = Schema::blog();

        let err = schema.check(&json!({ "translated": "Bonjour" }).into()).unwrap_err();
        assert!(err.to_string().contains("'title'"));

        let err = schema
            .check(&json!({ "title": "T", "content": 3 }).into())
            .unwrap_err();
        assert!(err.to_string().contains("'content'"));

        assert!(matches!(
            schema.check(&LlmResponse::from("Bonjour")),
            Err(LLMError::InvalidResponse(_))
        ));
    }
}
