//! Completion endpoint client.
//!
//! One POST per turn: `{question, context?}` in, `{answer}` out. No
//! streaming, no retries; a failed round-trip surfaces to the caller.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Canned reply returned by the demo-mode client.
pub const DEMO_ANSWER: &str = "Hello there! How can I help you today?";

/// Answers a user question, optionally enriched with retrieved context.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a single answer for `question`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unparseable response. Never silently returns an empty answer.
    async fn complete(&self, question: &str, context: Option<&str>) -> Result<String>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    answer: String,
}

/// Client for a live completion endpoint.
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
}

impl HttpCompletionClient {
    /// Create a client targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, question: &str, context: Option<&str>) -> Result<String> {
        let body = CompletionRequest { question, context };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read completion error body".to_string());
            return Err(Error::Endpoint { status, message });
        }

        let parsed: CompletionResponse = response.json().await.map_err(|err| {
            Error::Protocol(format!("Failed to parse completion response: {err}"))
        })?;

        Ok(parsed.answer)
    }
}

/// Deterministic client used when no completion endpoint is configured.
pub struct MockCompletionClient {
    answer: String,
}

impl MockCompletionClient {
    /// Create a mock returning [`DEMO_ANSWER`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            answer: DEMO_ANSWER.to_string(),
        }
    }

    /// Create a mock returning a fixed answer.
    #[must_use]
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, _question: &str, _context: Option<&str>) -> Result<String> {
        Ok(self.answer.clone())
    }
}
