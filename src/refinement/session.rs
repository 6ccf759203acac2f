// Refinement session: one question at a time, merge, decide what's next

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::collaborator::UpdateProposer;
use super::state::{SessionEvent, SessionState};
use super::types::{Progress, Transcript, TurnOutcome, UpdateRequest};
use crate::assessment::{AnalysisReport, Analyzer};
use crate::brief::{changed_fields, merge_briefs, Brief};
use crate::config::constants::{DEFAULT_EXPECTED_QUESTIONS, DEFAULT_OPENING_QUESTION};
use crate::config::RefinementConfig;
use crate::errors::{BriefError, BriefResult};
use crate::logging::{RoundLogEntry, RoundLogger, RoundOutcome};

const COMPLETION_MESSAGE: &str = "Thanks, that covers everything I needed. Your brief is ready.";

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub opening_question: String,
    pub ask_opening_question: bool,
    pub expected_questions: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            opening_question: DEFAULT_OPENING_QUESTION.to_string(),
            ask_opening_question: false,
            expected_questions: DEFAULT_EXPECTED_QUESTIONS,
        }
    }
}

impl From<&RefinementConfig> for SessionSettings {
    fn from(config: &RefinementConfig) -> Self {
        Self {
            opening_question: config.opening_question.clone(),
            ask_opening_question: config.ask_opening_question,
            expected_questions: config.expected_questions,
        }
    }
}

/// A single refinement conversation over one brief.
///
/// The brief is only ever replaced by the result of `merge_briefs`, so a
/// failed or discarded round leaves it exactly as it was.
pub struct RefinementSession {
    id: String,
    state: SessionState,
    brief: Brief,
    transcript: Transcript,
    proposer: Arc<dyn UpdateProposer>,
    analyzer: Analyzer,
    settings: SessionSettings,
    source_transcript: Option<String>,
    round_logger: Option<RoundLogger>,
    cancel: CancellationToken,
    answered: usize,
    question_seq: usize,
}

impl RefinementSession {
    pub fn new(brief: Brief, proposer: Arc<dyn UpdateProposer>, settings: SessionSettings) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: SessionState::Idle,
            brief,
            transcript: Transcript::new(),
            proposer,
            analyzer: Analyzer::standard(),
            settings,
            source_transcript: None,
            round_logger: None,
            cancel: CancellationToken::new(),
            answered: 0,
            question_seq: 0,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Source material passed to the collaborator on every round
    pub fn with_source_transcript(mut self, source: impl Into<String>) -> Self {
        self.source_transcript = Some(source.into());
        self
    }

    pub fn with_round_logger(mut self, logger: RoundLogger) -> Self {
        self.round_logger = Some(logger);
        self
    }

    // ── Accessors ──────────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn brief(&self) -> &Brief {
        &self.brief
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.answered, self.settings.expected_questions)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Analysis of the current brief. Cached until the brief changes.
    pub fn report(&mut self) -> Arc<AnalysisReport> {
        self.analyzer.analyze(&self.brief)
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Token cancelled when the session is closed from outside
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Final brief, consuming the session
    pub fn into_brief(self) -> Brief {
        self.brief
    }

    // ── Loop ───────────────────────────────────────────────────────────────────

    /// Ask the opening question. Only valid once, from idle.
    pub async fn start(&mut self) -> BriefResult<String> {
        if self.state != SessionState::Idle {
            return Err(BriefError::InvalidTransition {
                from: self.state.name(),
                event: SessionEvent::Start.name(),
            });
        }

        let question = if self.settings.ask_opening_question {
            match self.proposer.opening_question(&self.brief).await {
                Ok(q) if !q.trim().is_empty() => q.trim().to_string(),
                Ok(_) => self.settings.opening_question.clone(),
                Err(e) => {
                    warn!("Opening question request failed, using default: {}", e);
                    self.settings.opening_question.clone()
                }
            }
        } else {
            self.settings.opening_question.clone()
        };

        self.transition(SessionEvent::Start)?;
        self.ask(&question);
        self.analyzer.analyze(&self.brief);

        info!(session = %self.id, fields = self.brief.len(), "Refinement session started");
        Ok(question)
    }

    /// Submit the user's answer to the current question and run one round.
    pub async fn submit_answer(&mut self, answer: &str) -> BriefResult<TurnOutcome> {
        if self.state.is_terminal() {
            return Err(BriefError::SessionClosed);
        }
        if self.cancel.is_cancelled() {
            self.transition(SessionEvent::Cancelled)?;
            return Err(BriefError::SessionClosed);
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(BriefError::Validation("answer is empty".to_string()));
        }

        self.transition(SessionEvent::AnswerSubmitted)?;

        let question = self.transcript.last_question().cloned();
        let question_id = question.as_ref().and_then(|q| q.question_id.clone());
        let question_text = question.map(|q| q.content).unwrap_or_default();
        self.transcript.add_user_message(answer, question_id);

        let request = UpdateRequest {
            document: self.brief.clone(),
            transcript: self.transcript.messages().to_vec(),
            answer: answer.to_string(),
            source_transcript: self.source_transcript.clone(),
        };

        let proposer = Arc::clone(&self.proposer);
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            _ = cancel.cancelled() => None,
            result = proposer.propose(&request) => Some(result),
        };

        // A close that raced a completed response still wins
        let result = match result {
            Some(result) if !self.cancel.is_cancelled() => result,
            _ => {
                debug!(session = %self.id, "Session closed mid-request; discarding response");
                self.transition(SessionEvent::Cancelled)?;
                self.log_round(RoundLogEntry::new(&self.id, &question_text, answer, RoundOutcome::Discarded));
                return Ok(TurnOutcome::Discarded);
            }
        };

        let proposal = match result {
            Ok(proposal) => proposal,
            Err(error) => {
                if error.is_recoverable() {
                    warn!(session = %self.id, "Collaborator failed, brief unchanged: {}", error);
                } else {
                    error!(session = %self.id, "Collaborator failed unexpectedly, brief unchanged: {}", error);
                }
                self.transition(SessionEvent::ProposalFailed)?;
                self.transcript.add_assistant_message(error.user_message(), None);
                self.transition(SessionEvent::Recovered)?;
                self.log_round(
                    RoundLogEntry::new(&self.id, &question_text, answer, RoundOutcome::Recovered)
                        .with_error(error.to_string()),
                );
                return Ok(TurnOutcome::Recovered { error });
            }
        };

        self.transition(SessionEvent::ProposalReceived)?;
        let merged = merge_briefs(&self.brief, &proposal.updated_document);
        let changed = changed_fields(&self.brief, &merged);
        self.brief = merged;
        self.transition(SessionEvent::Merged)?;
        self.answered += 1;
        debug!(session = %self.id, changed = ?changed, "Merged proposal");

        self.analyzer.analyze(&self.brief);

        let outcome = match proposal.next_question {
            Some(question) => {
                self.transition(SessionEvent::QuestionAsked)?;
                self.ask(&question);
                TurnOutcome::Asked {
                    question,
                    changed_fields: changed.clone(),
                }
            }
            None => {
                self.transition(SessionEvent::Finished)?;
                self.transcript.add_assistant_message(COMPLETION_MESSAGE, None);
                info!(session = %self.id, rounds = self.answered, "Refinement session complete");
                TurnOutcome::Completed {
                    changed_fields: changed.clone(),
                }
            }
        };

        let logged = if matches!(outcome, TurnOutcome::Asked { .. }) {
            RoundOutcome::Asked
        } else {
            RoundOutcome::Completed
        };
        self.log_round(RoundLogEntry::new(&self.id, &question_text, answer, logged).with_changes(changed));

        Ok(outcome)
    }

    /// End the session early. The merged brief so far is kept.
    pub fn cancel(&mut self) -> BriefResult<()> {
        self.cancel.cancel();
        if self.state.is_terminal() {
            return Ok(());
        }
        self.transition(SessionEvent::Cancelled)?;
        info!(session = %self.id, rounds = self.answered, "Refinement session cancelled");
        Ok(())
    }

    // ── Private helpers ────────────────────────────────────────────────────────

    fn transition(&mut self, event: SessionEvent) -> BriefResult<()> {
        let next = self.state.on(event)?;
        debug!(session = %self.id, "{} --{}--> {}", self.state, event.name(), next);
        self.state = next;
        Ok(())
    }

    fn ask(&mut self, question: &str) {
        self.question_seq += 1;
        let id = format!("q{}", self.question_seq);
        self.transcript.add_assistant_message(question, Some(id));
    }

    fn log_round(&self, entry: RoundLogEntry) {
        if let Some(logger) = &self.round_logger {
            if let Err(e) = logger.log_round(&entry) {
                warn!("Failed to write round log: {:#}", e);
            }
        }
    }
}
