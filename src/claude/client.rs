// HTTP client for the Anthropic Messages API

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use super::retry::{with_retry, RetryPolicy};
use super::types::{MessageRequest, MessageResponse};
use crate::config::constants::{ANTHROPIC_VERSION, DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};

pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl ClaudeClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against a non-default endpoint (proxies, test servers)
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// Send a message with retry logic
    pub async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        with_retry(self.retry, || self.send_message_once(request)).await
    }

    /// Send a single message request (no retry)
    async fn send_message_once(&self, request: &MessageRequest) -> Result<MessageResponse> {
        tracing::debug!(model = %request.model, messages = request.messages.len(), "Sending request to Claude API");

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Claude API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let message_response: MessageResponse = response
            .json()
            .await
            .context("Failed to parse Claude API response")?;

        tracing::debug!(id = %message_response.id, stop_reason = ?message_response.stop_reason, "Received response");

        Ok(message_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_BODY: &str = r#"{"id":"msg_1","type":"message","role":"assistant","model":"claude-test",
        "stop_reason":"end_turn","content":[{"type":"text","text":"What is the launch date?"}]}"#;

    fn instant_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ClaudeClient::new("test-key".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ClaudeClient::with_base_url("k".to_string(), "http://localhost:9/").unwrap();
        assert_eq!(client.messages_url(), "http://localhost:9/v1/messages");
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(OK_BODY)
            .create_async()
            .await;

        let client = ClaudeClient::with_base_url("test-key".to_string(), &server.url()).unwrap();
        let response = client.send_message(&MessageRequest::new("hi")).await.unwrap();

        assert_eq!(response.text(), "What is the launch date?");
        assert_eq!(response.model, "claude-test");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_retried_then_reported() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(500)
            .with_body("overloaded")
            .expect(3)
            .create_async()
            .await;

        let client = ClaudeClient::with_base_url("k".to_string(), &server.url())
            .unwrap()
            .with_retry_policy(instant_retry());
        let err = client
            .send_message(&MessageRequest::new("hi"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("overloaded"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = ClaudeClient::with_base_url("k".to_string(), &server.url())
            .unwrap()
            .with_retry_policy(RetryPolicy {
                max_attempts: 1,
                base_delay: Duration::ZERO,
            });
        let err = client.send_message(&MessageRequest::new("hi")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
