//! Embedding service client.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Dimensionality of the embedding vectors.
pub const EMBEDDING_DIM: usize = 1536;

/// Computes an embedding vector for a piece of text.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed `text` into a vector of [`EMBEDDING_DIM`] floats.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unparseable response.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

/// Client for an OpenAI-compatible embeddings endpoint.
pub struct HttpEmbeddingClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpEmbeddingClient {
    /// Create a client for `endpoint` authenticated with `api_key`.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read embedding error body".to_string());
            return Err(Error::Endpoint { status, message });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|err| Error::Protocol(format!("Failed to parse embedding response: {err}")))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|row| row.embedding)
            .ok_or_else(|| Error::Protocol("Embedding response contained no rows".to_string()))
    }
}

/// Deterministic client used when no embedding API key is configured.
///
/// Returns the all-zeros vector, which matches nothing above any positive
/// similarity threshold.
#[derive(Debug, Default)]
pub struct MockEmbeddingClient;

#[async_trait]
impl EmbeddingClient for MockEmbeddingClient {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0; EMBEDDING_DIM])
    }
}
