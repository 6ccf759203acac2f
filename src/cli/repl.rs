// Interactive refine loop

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::future::Future;
use tracing::debug;

use super::commands::{format_help, Command, Input};
use super::render;
use crate::brief::Brief;
use crate::errors::BriefError;
use crate::refinement::{SessionHandle, TurnOutcome};

const PROMPT: &str = "› ";

/// Close the session on every interrupt, not just the first, until aborted
async fn close_on_interrupt<F, Fut>(handle: SessionHandle, mut interrupt: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    while interrupt().await.is_ok() {
        handle.close();
        debug!("Interrupt received; session closed");
    }
}

/// Run the question/answer loop until the session completes or the user stops.
/// Returns the final brief.
pub async fn run_refine_loop(handle: SessionHandle) -> Result<Brief> {
    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;

    // Ctrl-C while a request is in flight closes the session; the response is dropped
    let signal_task = tokio::spawn(close_on_interrupt(handle.clone(), tokio::signal::ctrl_c));

    let question = handle.start().await?;
    println!("{}", render::format_intro());
    println!("{}", render::render_question(&question, handle.progress().await));

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                handle.cancel().await?;
                println!("Stopped. Keeping the brief as it is.");
                break;
            }
            Err(e) => return Err(e).context("Failed to read input"),
        };

        match Input::classify(&line) {
            Input::Empty => continue,
            Input::UnknownCommand(cmd) => {
                println!("Unknown command {cmd}. Type /help for the list.");
            }
            Input::Command(Command::Help) => println!("{}", format_help()),
            Input::Command(Command::Status) => {
                let report = handle.report().await;
                println!(
                    "{}",
                    render::render_status(handle.state().await, handle.progress().await, &report)
                );
            }
            Input::Command(Command::Plan) => {
                let report = handle.report().await;
                println!("{}", render::render_plan(&report.action_plan));
            }
            Input::Command(Command::Cancel) | Input::Command(Command::Quit) => {
                handle.cancel().await?;
                println!("Stopped. Keeping the brief as it is.");
                break;
            }
            Input::Answer(answer) => {
                let _ = editor.add_history_entry(answer.as_str());
                match handle.send(&answer).await {
                    Ok(TurnOutcome::Asked {
                        question,
                        changed_fields,
                    }) => {
                        println!("{}", render::render_changes(&changed_fields));
                        println!("{}", render::render_question(&question, handle.progress().await));
                    }
                    Ok(TurnOutcome::Completed { changed_fields }) => {
                        println!("{}", render::render_changes(&changed_fields));
                        println!("{} The brief is complete.", "✓".green().bold());
                        break;
                    }
                    Ok(TurnOutcome::Recovered { error }) => {
                        println!("  {} {}", "⚠".yellow(), error.user_message());
                    }
                    Ok(TurnOutcome::Discarded) | Err(BriefError::SessionClosed) => {
                        println!("Session closed. Keeping the brief as it was before that answer.");
                        break;
                    }
                    Err(BriefError::Validation(_)) => println!("Please type an answer."),
                    Err(e) => {
                        signal_task.abort();
                        return Err(e).context("Refinement failed");
                    }
                }
            }
        }
    }

    signal_task.abort();
    Ok(handle.brief().await)
}
