// Anthropic Messages API client

mod client;
mod retry;
mod types;

pub use client::ClaudeClient;
pub use retry::{with_retry, RetryPolicy};
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse};
