//! Vector-similarity document search.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// A document returned by the similarity search. Ephemeral: produced per
/// request and discarded after concatenation into a context block.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievedDocument {
    /// Document text.
    pub content: String,

    /// Similarity to the query on a [0, 1] scale.
    pub similarity: f32,
}

/// Searches stored documents by embedding similarity.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Return up to `match_count` documents with similarity above
    /// `match_threshold`, in descending rank order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unparseable response.
    async fn match_documents(
        &self,
        query_embedding: &[f32],
        match_threshold: f32,
        match_count: usize,
    ) -> Result<Vec<RetrievedDocument>>;
}

#[derive(Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_threshold: f32,
    match_count: usize,
}

/// Client for a datastore exposing the similarity search as a remote
/// procedure (`POST {url}/rest/v1/rpc/{rpc}`).
pub struct HttpDocumentIndex {
    client: Client,
    url: String,
    api_key: String,
    rpc: String,
}

impl HttpDocumentIndex {
    /// Create a client for the datastore at `url`.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        rpc: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key: api_key.into(),
            rpc: rpc.into(),
        }
    }
}

#[async_trait]
impl DocumentIndex for HttpDocumentIndex {
    async fn match_documents(
        &self,
        query_embedding: &[f32],
        match_threshold: f32,
        match_count: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        let body = MatchRequest {
            query_embedding,
            match_threshold,
            match_count,
        };

        let response = self
            .client
            .post(format!("{}/rest/v1/rpc/{}", self.url, self.rpc))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read similarity error body".to_string());
            return Err(Error::Endpoint { status, message });
        }

        let documents: Vec<RetrievedDocument> = response.json().await.map_err(|err| {
            Error::Protocol(format!("Failed to parse similarity response: {err}"))
        })?;

        Ok(documents)
    }
}

/// Deterministic index used when no datastore is configured. Matches nothing.
#[derive(Debug, Default)]
pub struct MockDocumentIndex;

#[async_trait]
impl DocumentIndex for MockDocumentIndex {
    async fn match_documents(
        &self,
        _query_embedding: &[f32],
        _match_threshold: f32,
        _match_count: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        Ok(Vec::new())
    }
}
