//! Retrieval pipeline: embed the question, search for similar documents,
//! concatenate their text into a context block.
//!
//! Best-effort enrichment only. Any failure degrades to an empty context
//! string and is logged; callers treat `""` as "no context available".

use crate::config::RetrievalConfig;
use crate::remote::{DocumentIndex, EmbeddingClient};
use std::sync::Arc;
use tracing::{debug, warn};

/// Retrieves context for a user question.
pub struct RetrievalPipeline {
    embedder: Arc<dyn EmbeddingClient>,
    index: Arc<dyn DocumentIndex>,
    match_threshold: f32,
    match_count: usize,
}

impl RetrievalPipeline {
    /// Create a pipeline over the given collaborators.
    #[must_use]
    pub fn new(
        embedder: Arc<dyn EmbeddingClient>,
        index: Arc<dyn DocumentIndex>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            match_threshold: config.match_threshold,
            match_count: config.match_count,
        }
    }

    /// Retrieve a context block for `question`.
    ///
    /// Returns matched document texts joined with blank lines, in the
    /// index's rank order. Returns `""` when nothing matches or when any
    /// step fails; never an error.
    pub async fn retrieve_context(&self, question: &str) -> String {
        let embedding = match self.embedder.embed(question).await {
            Ok(embedding) => embedding,
            Err(err) => {
                warn!("embedding failed, continuing without context: {err}");
                return String::new();
            }
        };

        let documents = match self
            .index
            .match_documents(&embedding, self.match_threshold, self.match_count)
            .await
        {
            Ok(documents) => documents,
            Err(err) => {
                warn!("similarity search failed, continuing without context: {err}");
                return String::new();
            }
        };

        debug!("retrieved {} context document(s)", documents.len());

        documents
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
