// Update collaborator: the seam between the loop and the language model

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::types::{ConversationMessage, UpdateProposal, UpdateRequest};
use crate::brief::{Brief, BriefField};
use crate::claude::Message;
use crate::errors::{BriefError, BriefResult};
use crate::generators::{extract_json_object, strip_markdown_fences, Generator};

/// Proposes brief updates and the next question
#[async_trait]
pub trait UpdateProposer: Send + Sync {
    /// A tailored first question for `brief`
    async fn opening_question(&self, brief: &Brief) -> BriefResult<String>;

    async fn propose(&self, request: &UpdateRequest) -> BriefResult<UpdateProposal>;
}

const NEXT_QUESTION_KEY: &str = "nextQuestion";
const UPDATED_DOCUMENT_KEY: &str = "updatedDocument";

fn update_system_prompt() -> String {
    let keys: Vec<&str> = BriefField::ALL.iter().map(|f| f.key()).collect();
    format!(
        "You help a marketer build a creative brief by asking one question at a time.\n\
         The brief is a JSON object. Its core sections are: {}.\n\
         After each answer, fold what you learned into the brief and decide what to ask next.\n\
         Never delete information the brief already has.\n\
         Reply with a single JSON object with exactly two keys:\n\
         - \"nextQuestion\": the next question as a string, or null when the brief is complete\n\
         - \"updatedDocument\": the full revised brief as a JSON object\n\
         Do not wrap the JSON in markdown code fences.",
        keys.join(", ")
    )
}

const OPENING_SYSTEM_PROMPT: &str = "\
You help a marketer build a creative brief. Given the brief so far, reply with the single most \
useful first question to ask, as plain text with no preamble.";

/// `UpdateProposer` backed by any `Generator`
pub struct GeneratorProposer {
    generator: Arc<dyn Generator>,
}

impl GeneratorProposer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    fn build_prompt(request: &UpdateRequest) -> String {
        let mut prompt = format!(
            "Current brief:\n{}\n\nLatest answer:\n{}",
            request.document.to_pretty_json(),
            request.answer
        );
        if let Some(source) = &request.source_transcript {
            prompt.push_str(&format!("\n\nSource material to draw on:\n{source}"));
        }
        prompt
    }
}

#[async_trait]
impl UpdateProposer for GeneratorProposer {
    async fn opening_question(&self, brief: &Brief) -> BriefResult<String> {
        let prompt = format!("Brief so far:\n{}", brief.to_pretty_json());
        let response = self
            .generator
            .generate(vec![Message::user(prompt)], Some(OPENING_SYSTEM_PROMPT.to_string()))
            .await
            .map_err(|e| BriefError::Network(format!("{e:#}")))?;

        let question = response.text.trim();
        if question.is_empty() {
            return Err(BriefError::Validation("empty opening question".to_string()));
        }
        Ok(question.to_string())
    }

    async fn propose(&self, request: &UpdateRequest) -> BriefResult<UpdateProposal> {
        // Earlier turns give context; the latest answer travels in the prompt with the brief
        let mut messages: Vec<Message> = request
            .transcript
            .iter()
            .map(ConversationMessage::to_api_message)
            .collect();
        if messages.last().is_some_and(|m| m.role == "user") {
            messages.pop();
        }
        messages.push(Message::user(Self::build_prompt(request)));

        tracing::debug!(generator = self.generator.name(), messages = messages.len(), "Requesting brief update");

        let response = self
            .generator
            .generate(messages, Some(update_system_prompt()))
            .await
            .map_err(|e| BriefError::Network(format!("{e:#}")))?;

        parse_update_response(&response.text)
    }
}

/// Parse the model's reply into an `UpdateProposal`.
///
/// The object must hold exactly `nextQuestion` (string or null) and
/// `updatedDocument` (object). A blank question counts as null.
pub fn parse_update_response(text: &str) -> BriefResult<UpdateProposal> {
    let stripped = strip_markdown_fences(text);
    let value: Value = serde_json::from_str(stripped)
        .or_else(|e| {
            extract_json_object(stripped)
                .and_then(|slice| serde_json::from_str(slice).ok())
                .ok_or(e)
        })
        .map_err(|e| BriefError::Parse(e.to_string()))?;

    let Value::Object(mut object) = value else {
        return Err(BriefError::Validation("expected a JSON object".to_string()));
    };

    if let Some(extra) = object
        .keys()
        .find(|k| *k != NEXT_QUESTION_KEY && *k != UPDATED_DOCUMENT_KEY)
    {
        return Err(BriefError::Validation(format!("unexpected key `{extra}`")));
    }

    let next_question = match object.remove(NEXT_QUESTION_KEY) {
        Some(Value::String(q)) if q.trim().is_empty() => None,
        Some(Value::String(q)) => Some(q.trim().to_string()),
        Some(Value::Null) => None,
        Some(other) => {
            return Err(BriefError::Validation(format!(
                "`{NEXT_QUESTION_KEY}` must be a string or null, got {}",
                crate::brief::json_type_name(&other)
            )))
        }
        None => return Err(BriefError::Validation(format!("missing `{NEXT_QUESTION_KEY}`"))),
    };

    let updated_document = match object.remove(UPDATED_DOCUMENT_KEY) {
        Some(Value::Object(map)) => Brief::from(map),
        Some(other) => {
            return Err(BriefError::Validation(format!(
                "`{UPDATED_DOCUMENT_KEY}` must be an object, got {}",
                crate::brief::json_type_name(&other)
            )))
        }
        None => return Err(BriefError::Validation(format!("missing `{UPDATED_DOCUMENT_KEY}`"))),
    };

    Ok(UpdateProposal {
        next_question,
        updated_document,
    })
}
