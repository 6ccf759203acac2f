// Slash command handling for the refine REPL

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Plan,
    Cancel,
    Quit,
}

/// What a line of REPL input means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    UnknownCommand(String),
    Answer(String),
    Empty,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "/help" | "/?" => Some(Command::Help),
            "/status" => Some(Command::Status),
            "/plan" => Some(Command::Plan),
            "/cancel" => Some(Command::Cancel),
            "/quit" | "/exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

impl Input {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Input::Empty;
        }
        if trimmed.starts_with('/') {
            return match Command::parse(trimmed) {
                Some(command) => Input::Command(command),
                None => Input::UnknownCommand(trimmed.to_string()),
            };
        }
        Input::Answer(trimmed.to_string())
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  /help      - Show this help message
  /status    - Show progress and the current scores
  /plan      - Show the action plan for the brief so far
  /cancel    - Stop refining and keep the brief as it is
  /quit      - Same as /cancel

Anything else is sent as your answer to the current question."#
        .to_string()
}
