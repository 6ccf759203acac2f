// Refinement loop data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brief::Brief;
use crate::claude::Message;
use crate::errors::BriefError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One line of the visible conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Set on assistant questions and on the answers to them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
}

impl ConversationMessage {
    pub fn to_api_message(&self) -> Message {
        match self.role {
            Role::User => Message::user(self.content.clone()),
            Role::Assistant => Message::assistant(self.content.clone()),
        }
    }
}

/// Conversation history for one refinement session
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user_message(&mut self, content: impl Into<String>, question_id: Option<String>) {
        self.push(Role::User, content.into(), question_id);
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>, question_id: Option<String>) {
        self.push(Role::Assistant, content.into(), question_id);
    }

    fn push(&mut self, role: Role, content: String, question_id: Option<String>) {
        self.messages.push(ConversationMessage {
            role,
            content,
            timestamp: Utc::now(),
            question_id,
        });
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Messages in API form, for the language model
    pub fn to_api_messages(&self) -> Vec<Message> {
        self.messages.iter().map(ConversationMessage::to_api_message).collect()
    }

    /// Most recent assistant message that asked a question
    pub fn last_question(&self) -> Option<&ConversationMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && m.question_id.is_some())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(answered: usize, expected: usize) -> Self {
        Self {
            current: answered,
            total: expected.max(answered),
        }
    }
}

/// Everything the collaborator gets for one round
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub document: Brief,
    pub transcript: Vec<ConversationMessage>,
    pub answer: String,
    /// Optional source material (meeting notes, call transcript)
    pub source_transcript: Option<String>,
}

/// The collaborator's reply: the next question (None = done) and a revised brief
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProposal {
    pub next_question: Option<String>,
    pub updated_document: Brief,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Merged and asked another question
    Asked {
        question: String,
        changed_fields: Vec<String>,
    },
    /// Merged and finished
    Completed { changed_fields: Vec<String> },
    /// The collaborator failed; the brief is unchanged and the session waits
    /// for another answer
    Recovered { error: BriefError },
    /// The session closed while the request was in flight; nothing merged
    Discarded,
}

impl TurnOutcome {
    pub fn changed_fields(&self) -> &[String] {
        match self {
            TurnOutcome::Asked { changed_fields, .. } | TurnOutcome::Completed { changed_fields } => {
                changed_fields
            }
            TurnOutcome::Recovered { .. } | TurnOutcome::Discarded => &[],
        }
    }
}
