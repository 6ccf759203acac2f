// Refinement orchestrator
//
// Drives the question/answer loop: each answer goes to the update
// collaborator, the proposed brief is merged into the canonical one, and the
// collaborator's next question (or lack of one) decides whether to continue.

pub mod collaborator;
pub mod handle;
pub mod session;
pub mod state;
pub mod types;

pub use collaborator::{parse_update_response, GeneratorProposer, UpdateProposer};
pub use handle::SessionHandle;
pub use session::{RefinementSession, SessionSettings};
pub use state::{SessionEvent, SessionState};
pub use types::{ConversationMessage, Progress, Role, Transcript, TurnOutcome, UpdateProposal, UpdateRequest};
