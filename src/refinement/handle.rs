// Shared session handle: one round in flight at a time

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::session::RefinementSession;
use super::state::SessionState;
use super::types::{Progress, TurnOutcome};
use crate::assessment::AnalysisReport;
use crate::brief::Brief;
use crate::errors::{BriefError, BriefResult};

/// Cloneable handle to a `RefinementSession`.
///
/// A second `send` while a round is running fails fast with `Busy` instead
/// of queueing. `close` never waits on the lock: it cancels the session
/// token, and any in-flight response is discarded.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<RefinementSession>>,
    cancel: CancellationToken,
}

impl SessionHandle {
    pub fn new(session: RefinementSession) -> Self {
        let cancel = session.cancellation_token();
        Self {
            inner: Arc::new(Mutex::new(session)),
            cancel,
        }
    }

    pub async fn start(&self) -> BriefResult<String> {
        let mut session = self.inner.try_lock().map_err(|_| BriefError::Busy)?;
        session.start().await
    }

    pub async fn send(&self, answer: &str) -> BriefResult<TurnOutcome> {
        if self.cancel.is_cancelled() {
            return Err(BriefError::SessionClosed);
        }
        let mut session = self.inner.try_lock().map_err(|_| BriefError::Busy)?;
        session.submit_answer(answer).await
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current brief. Waits for any in-flight round to settle.
    pub async fn brief(&self) -> Brief {
        self.inner.lock().await.brief().clone()
    }

    pub async fn progress(&self) -> Progress {
        self.inner.lock().await.progress()
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state()
    }

    pub async fn report(&self) -> Arc<AnalysisReport> {
        self.inner.lock().await.report()
    }

    /// Close the token and move the session to complete, keeping the brief
    pub async fn cancel(&self) -> BriefResult<()> {
        self.close();
        self.inner.lock().await.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refinement::collaborator::UpdateProposer;
    use crate::refinement::session::SessionSettings;
    use crate::refinement::types::{UpdateProposal, UpdateRequest};
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    /// Signals when a proposal is requested, then waits to be released
    struct GatedProposer {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl UpdateProposer for GatedProposer {
        async fn opening_question(&self, _brief: &Brief) -> BriefResult<String> {
            Ok("unused".to_string())
        }

        async fn propose(&self, _request: &UpdateRequest) -> BriefResult<UpdateProposal> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(UpdateProposal {
                next_question: Some("Next?".to_string()),
                updated_document: Brief::new().with("summary", json!("A much longer summary")),
            })
        }
    }

    async fn started_handle() -> (SessionHandle, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let proposer = GatedProposer {
            started: started.clone(),
            release: release.clone(),
        };
        let session = RefinementSession::new(
            Brief::new().with("summary", "Short"),
            Arc::new(proposer),
            SessionSettings::default(),
        );
        let handle = SessionHandle::new(session);
        handle.start().await.unwrap();
        (handle, started, release)
    }

    #[tokio::test]
    async fn test_second_send_while_in_flight_is_busy() {
        let (handle, started, release) = started_handle().await;

        let first = tokio::spawn({
            let handle = handle.clone();
            async move { handle.send("first").await }
        });
        started.notified().await;

        assert_eq!(handle.send("second").await, Err(BriefError::Busy));

        release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, TurnOutcome::Asked { .. }));
        assert_eq!(handle.brief().await.get("summary"), Some(&json!("A much longer summary")));
    }

    #[tokio::test]
    async fn test_close_discards_in_flight_response() {
        let (handle, started, _release) = started_handle().await;

        let first = tokio::spawn({
            let handle = handle.clone();
            async move { handle.send("first").await }
        });
        started.notified().await;

        handle.close();
        assert_eq!(first.await.unwrap().unwrap(), TurnOutcome::Discarded);
        assert_eq!(handle.brief().await.get("summary"), Some(&json!("Short")));
        assert!(handle.is_closed());
        assert_eq!(handle.send("again").await, Err(BriefError::SessionClosed));
    }

    #[tokio::test]
    async fn test_progress_visible_through_handle() {
        let (handle, _started, release) = started_handle().await;
        release.notify_one();
        handle.send("answer").await.unwrap();
        assert_eq!(handle.progress().await.current, 1);
    }

    #[tokio::test]
    async fn test_cancel_completes_session() {
        let (handle, _started, _release) = started_handle().await;
        handle.cancel().await.unwrap();
        assert_eq!(handle.state().await, SessionState::Complete);
        assert!(handle.is_closed());
        assert!(!handle.report().await.degraded);
    }
}
