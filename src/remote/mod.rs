//! Remote collaborators: completion, embedding, similarity search, durable log.
//!
//! Collaborators are constructed once at startup from explicit
//! configuration and injected where needed. Each one falls back to a
//! deterministic mock when its credential or endpoint is absent, so the
//! rest of the crate stays exercisable without live services.

pub mod completion;
pub mod documents;
pub mod embedding;
pub mod messages;

pub use completion::{CompletionClient, HttpCompletionClient, MockCompletionClient, DEMO_ANSWER};
pub use documents::{DocumentIndex, HttpDocumentIndex, MockDocumentIndex, RetrievedDocument};
pub use embedding::{EmbeddingClient, HttpEmbeddingClient, MockEmbeddingClient, EMBEDDING_DIM};
pub use messages::{HttpMessageSink, MessageSink, NullMessageSink};

use crate::config::Config;
use std::sync::Arc;
use tracing::info;

/// Process-wide collaborator handles, built once from configuration.
pub struct Collaborators {
    /// Completion endpoint client.
    pub completion: Arc<dyn CompletionClient>,

    /// Embedding service client.
    pub embedder: Arc<dyn EmbeddingClient>,

    /// Vector-similarity document search.
    pub index: Arc<dyn DocumentIndex>,

    /// Durable message log sink.
    pub sink: Arc<dyn MessageSink>,
}

/// Build all remote collaborators from `config`, substituting mocks for
/// anything without credentials.
#[must_use]
pub fn build_collaborators(config: &Config) -> Collaborators {
    let completion: Arc<dyn CompletionClient> = if config.completion.is_demo() {
        info!("no completion endpoint configured, using demo responses");
        Arc::new(MockCompletionClient::new())
    } else {
        Arc::new(HttpCompletionClient::new(&config.completion.endpoint))
    };

    let embedder: Arc<dyn EmbeddingClient> = if config.embedding.is_demo() {
        info!("no embedding API key configured, using zero-vector embeddings");
        Arc::new(MockEmbeddingClient)
    } else {
        Arc::new(HttpEmbeddingClient::new(
            &config.embedding.endpoint,
            &config.embedding.api_key,
            &config.embedding.model,
        ))
    };

    let (index, sink): (Arc<dyn DocumentIndex>, Arc<dyn MessageSink>) =
        if config.datastore.is_demo() {
            info!("no datastore configured, similarity search and durable log disabled");
            (Arc::new(MockDocumentIndex), Arc::new(NullMessageSink))
        } else {
            (
                Arc::new(HttpDocumentIndex::new(
                    &config.datastore.url,
                    &config.datastore.api_key,
                    &config.datastore.match_rpc,
                )),
                Arc::new(HttpMessageSink::new(
                    &config.datastore.url,
                    &config.datastore.api_key,
                    &config.datastore.messages_table,
                )),
            )
        };

    Collaborators {
        completion,
        embedder,
        index,
        sink,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_builds_all_mocks() {
        let collaborators = build_collaborators(&Config::default());

        // Demo collaborators are deterministic: canned answer, zero vector,
        // no matches, discarded inserts.
        let answer = collaborators.completion.complete("hi", None).await.unwrap();
        assert_eq!(answer, DEMO_ANSWER);

        let embedding = collaborators.embedder.embed("hi").await.unwrap();
        assert_eq!(embedding.len(), EMBEDDING_DIM);

        let documents = collaborators
            .index
            .match_documents(&embedding, 0.78, 5)
            .await
            .unwrap();
        assert!(documents.is_empty());
    }
}
