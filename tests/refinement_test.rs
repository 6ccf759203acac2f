// End-to-end refinement rounds through a scripted generator

use anyhow::{bail, Result};
use async_trait::async_trait;
use briefsmith::claude::Message;
use briefsmith::generators::{Generator, GeneratorResponse};
use briefsmith::logging::{RoundLogger, RoundOutcome};
use briefsmith::refinement::{
    GeneratorProposer, RefinementSession, SessionHandle, SessionSettings, SessionState, TurnOutcome,
};
use briefsmith::{Brief, BriefError};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Replies with canned text in order and records what it was sent
struct ScriptedGenerator {
    replies: Mutex<Vec<String>>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedGenerator {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, messages: Vec<Message>, _system: Option<String>) -> Result<GeneratorResponse> {
        self.seen.lock().unwrap().push(messages);
        match self.replies.lock().unwrap().pop() {
            Some(text) => Ok(GeneratorResponse::text("scripted", text)),
            None => bail!("script exhausted"),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn session_with(generator: Arc<ScriptedGenerator>, brief: Brief) -> RefinementSession {
    RefinementSession::new(brief, Arc::new(GeneratorProposer::new(generator)), SessionSettings::default())
}

#[tokio::test]
async fn test_unparseable_reply_recovers_then_next_round_merges() {
    let generator = Arc::new(ScriptedGenerator::new(&[
        "Sure! Here is the brief you asked for",
        r#"```json
{"nextQuestion": "What budget do you have?", "updatedDocument": {"title": "Spring Refresh 2025", "objectives": ["Win back 8,000 lapsed subscribers", "Lift reactivation to 12%"]}}
```"#,
    ]));
    let original = Brief::new().with("title", "Spring");
    let mut session = session_with(generator.clone(), original.clone());
    session.start().await.unwrap();

    let outcome = session.submit_answer("Lapsed subscribers").await.unwrap();
    assert!(matches!(outcome, TurnOutcome::Recovered { error: BriefError::Parse(_) }));
    assert_eq!(session.brief(), &original);
    assert_eq!(session.state(), SessionState::AwaitingAnswer);
    assert_eq!(session.progress().current, 0);

    let outcome = session.submit_answer("Lapsed subscribers from last winter").await.unwrap();
    assert_eq!(
        outcome,
        TurnOutcome::Asked {
            question: "What budget do you have?".to_string(),
            changed_fields: vec!["title".to_string(), "objectives".to_string()],
        }
    );
    assert_eq!(session.brief().get("title"), Some(&json!("Spring Refresh 2025")));
    assert_eq!(session.progress().current, 1);
}

#[tokio::test]
async fn test_answer_and_brief_reach_the_generator() {
    let generator = Arc::new(ScriptedGenerator::new(&[
        r#"{"nextQuestion": null, "updatedDocument": {}}"#,
    ]));
    let mut session = session_with(generator.clone(), Brief::new().with("budget", "EUR 45,000"))
        .with_source_transcript("Call notes: the client wants a spring launch.");
    session.start().await.unwrap();

    let outcome = session.submit_answer("Parents of toddlers").await.unwrap();
    assert_eq!(outcome, TurnOutcome::Completed { changed_fields: vec![] });
    assert!(session.is_complete());

    let seen = generator.seen.lock().unwrap();
    let prompt = &seen[0].last().unwrap().content;
    assert!(prompt.contains("Parents of toddlers"));
    assert!(prompt.contains("EUR 45,000"));
    assert!(prompt.contains("spring launch"));
    // The opening question is context; the answer is not sent twice
    assert_eq!(seen[0].iter().filter(|m| m.content == "Parents of toddlers").count(), 0);
}

#[tokio::test]
async fn test_generator_failure_is_recovered_and_logged() {
    let dir = tempfile::tempdir().unwrap();
    let logger = RoundLogger::new(dir.path().join("rounds.jsonl")).unwrap();
    let generator = Arc::new(ScriptedGenerator::new(&[]));
    let mut session = session_with(generator, Brief::new()).with_round_logger(logger.clone());
    session.start().await.unwrap();

    let outcome = session.submit_answer("Anything").await.unwrap();
    assert!(matches!(outcome, TurnOutcome::Recovered { error: BriefError::Network(_) }));

    let entries = logger.read_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].outcome, RoundOutcome::Recovered);
    assert_eq!(entries[0].answer, "Anything");
    assert!(entries[0].error.is_some());
}

#[tokio::test]
async fn test_handle_cancel_keeps_merged_brief() {
    let generator = Arc::new(ScriptedGenerator::new(&[
        r#"{"nextQuestion": "Who is it for?", "updatedDocument": {"summary": "Six weeks of win-back emails and social ads"}}"#,
    ]));
    let handle = SessionHandle::new(session_with(generator, Brief::new()));
    handle.start().await.unwrap();
    handle.send("Win back lapsed subscribers").await.unwrap();

    handle.cancel().await.unwrap();
    assert_eq!(handle.state().await, SessionState::Complete);
    assert_eq!(handle.send("more").await, Err(BriefError::SessionClosed));
    assert_eq!(
        handle.brief().await.get("summary"),
        Some(&json!("Six weeks of win-back emails and social ads"))
    );
}
