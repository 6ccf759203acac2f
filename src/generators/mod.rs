// Unified generator interface for language-model backends

use anyhow::Result;
use async_trait::async_trait;

use crate::claude::Message;

pub mod claude;

pub use claude::ClaudeGenerator;

/// A text generator the refinement loop and enrichment can talk to
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a response for the conversation, with an optional system prompt
    async fn generate(&self, messages: Vec<Message>, system: Option<String>) -> Result<GeneratorResponse>;

    /// Get generator name for logging
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct GeneratorResponse {
    pub text: String,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    pub generator: String,
    pub model: String,
    pub stop_reason: Option<String>,
}

impl GeneratorResponse {
    /// Plain response with no provider metadata. Handy for scripted generators.
    pub fn text(generator: &str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: ResponseMetadata {
                generator: generator.to_string(),
                model: String::new(),
                stop_reason: None,
            },
        }
    }
}

/// Strip leading/trailing markdown code fences (```json ... ``` or ``` ... ```)
pub fn strip_markdown_fences(s: &str) -> &str {
    let s = s.trim();
    let s = if let Some(rest) = s.strip_prefix("```json") {
        rest
    } else if let Some(rest) = s.strip_prefix("```") {
        rest
    } else {
        s
    };
    if let Some(rest) = s.strip_suffix("```") {
        rest.trim()
    } else {
        s.trim()
    }
}

/// Best-effort slice of the outermost `{...}` in a chatty response
pub fn extract_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (start < end).then(|| &s[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown_fences_json() {
        let s = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_markdown_fences(s), "{\"a\":1}");
    }

    #[test]
    fn test_strip_markdown_fences_plain() {
        let s = "```\n{\"a\":1}\n```";
        assert_eq!(strip_markdown_fences(s), "{\"a\":1}");
    }

    #[test]
    fn test_strip_markdown_fences_no_fences() {
        assert_eq!(strip_markdown_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(
            extract_json_object("Sure! {\"a\":{\"b\":2}} hope that helps"),
            Some("{\"a\":{\"b\":2}}")
        );
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}
