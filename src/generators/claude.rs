// Claude generator implementation

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::claude::{ClaudeClient, Message, MessageRequest, MessageResponse};

use super::{Generator, GeneratorResponse, ResponseMetadata};

/// Claude API generator
pub struct ClaudeGenerator {
    client: Arc<ClaudeClient>,
    model: String,
    max_tokens: u32,
}

impl ClaudeGenerator {
    pub fn new(client: Arc<ClaudeClient>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
        }
    }

    fn convert_to_unified(&self, response: MessageResponse) -> GeneratorResponse {
        GeneratorResponse {
            text: response.text(),
            metadata: ResponseMetadata {
                generator: "claude".to_string(),
                model: response.model,
                stop_reason: response.stop_reason,
            },
        }
    }
}

#[async_trait]
impl Generator for ClaudeGenerator {
    async fn generate(&self, messages: Vec<Message>, system: Option<String>) -> Result<GeneratorResponse> {
        let mut request = MessageRequest::with_context(messages)
            .with_model(&self.model)
            .with_max_tokens(self.max_tokens);
        if let Some(system) = system {
            request = request.with_system(system);
        }

        let response = self.client.send_message(&request).await?;
        Ok(self.convert_to_unified(response))
    }

    fn name(&self) -> &str {
        "Claude API"
    }
}
