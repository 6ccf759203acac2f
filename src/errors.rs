// Error taxonomy for the brief engine
//
// Collaborator failures (network, parse, validation) are recoverable: the
// refinement session surfaces them as a message and keeps going. Internal
// failures are downgraded by the analyzer and never escape as panics.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BriefError {
    /// A collaborator response had the wrong shape
    #[error("invalid collaborator response: {0}")]
    Validation(String),

    /// The collaborator could not be reached or returned a transport error
    #[error("collaborator unreachable: {0}")]
    Network(String),

    /// The collaborator response was not JSON or was truncated
    #[error("could not parse collaborator response: {0}")]
    Parse(String),

    /// Unexpected failure inside scoring or planning
    #[error("internal analysis failure: {0}")]
    Internal(String),

    /// A request is already in flight for this session
    #[error("session is busy with another request")]
    Busy,

    /// The session has been closed or completed
    #[error("session is closed")]
    SessionClosed,

    #[error("invalid transition from {from} on {event}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

impl BriefError {
    /// Whether a refinement session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BriefError::Validation(_) | BriefError::Network(_) | BriefError::Parse(_)
        )
    }

    /// Short, user-facing retry message shown in the transcript.
    pub fn user_message(&self) -> String {
        match self {
            BriefError::Network(_) => {
                "I couldn't reach the assistant just now. Your brief is safe. Please try answering again.".to_string()
            }
            BriefError::Parse(_) | BriefError::Validation(_) => {
                "I received an unexpected reply and ignored it. Your brief is unchanged. Please try again.".to_string()
            }
            other => format!("Something went wrong: {other}"),
        }
    }
}

pub type BriefResult<T> = std::result::Result<T, BriefError>;
