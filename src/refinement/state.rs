// Refinement state machine: pure transition table

use serde::Serialize;
use std::fmt;

use crate::errors::{BriefError, BriefResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Idle,
    AwaitingAnswer,
    RequestingUpdate,
    Merging,
    DecidingNext,
    Complete,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    AnswerSubmitted,
    ProposalReceived,
    ProposalFailed,
    Merged,
    QuestionAsked,
    Finished,
    Recovered,
    Cancelled,
}

impl SessionState {
    /// Next state for `event`, or `InvalidTransition`.
    pub fn on(self, event: SessionEvent) -> BriefResult<SessionState> {
        use SessionEvent as E;
        use SessionState as S;

        let next = match (self, event) {
            (S::Idle, E::Start) => S::AwaitingAnswer,
            (S::AwaitingAnswer, E::AnswerSubmitted) => S::RequestingUpdate,
            (S::RequestingUpdate, E::ProposalReceived) => S::Merging,
            (S::RequestingUpdate, E::ProposalFailed) => S::Error,
            (S::Merging, E::Merged) => S::DecidingNext,
            (S::DecidingNext, E::QuestionAsked) => S::AwaitingAnswer,
            (S::DecidingNext, E::Finished) => S::Complete,
            (S::Error, E::Recovered) => S::AwaitingAnswer,
            (s, E::Cancelled) if s != S::Complete => S::Complete,
            (from, event) => {
                return Err(BriefError::InvalidTransition {
                    from: from.name(),
                    event: event.name(),
                })
            }
        };
        Ok(next)
    }

    pub fn name(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingAnswer => "awaiting-answer",
            SessionState::RequestingUpdate => "requesting-update",
            SessionState::Merging => "merging",
            SessionState::DecidingNext => "deciding-next",
            SessionState::Complete => "complete",
            SessionState::Error => "error",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == SessionState::Complete
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SessionEvent {
    pub fn name(self) -> &'static str {
        match self {
            SessionEvent::Start => "start",
            SessionEvent::AnswerSubmitted => "answer-submitted",
            SessionEvent::ProposalReceived => "proposal-received",
            SessionEvent::ProposalFailed => "proposal-failed",
            SessionEvent::Merged => "merged",
            SessionEvent::QuestionAsked => "question-asked",
            SessionEvent::Finished => "finished",
            SessionEvent::Recovered => "recovered",
            SessionEvent::Cancelled => "cancelled",
        }
    }
}
