//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`RAGCHAT_*`, plus the conventional
//!    `OPENAI_API_KEY`, `SUPABASE_URL`, `SUPABASE_ANON_KEY`)
//! 2. Config file (`~/.ragchat/config.toml`)
//! 3. Defaults
//!
//! Every remote collaborator degrades to a deterministic mock when its
//! credential or endpoint is absent, so the crate stays exercisable
//! without live services.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Local storage configuration.
    pub storage: StorageConfig,

    /// Completion endpoint configuration.
    pub completion: CompletionConfig,

    /// Embedding service configuration.
    pub embedding: EmbeddingConfig,

    /// Remote datastore (durable log + vector search) configuration.
    pub datastore: DatastoreConfig,

    /// Retrieval pipeline configuration.
    pub retrieval: RetrievalConfig,

    /// Chat behavior configuration.
    pub chat: ChatConfig,
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the ragchat home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_ragchat_home(),
        }
    }
}

/// Completion endpoint configuration.
///
/// The endpoint is expected to accept `{question, context?}` and answer
/// with `{answer}`. Empty endpoint selects the demo-mode mock.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CompletionConfig {
    /// Completion endpoint URL (empty to run in demo mode).
    pub endpoint: String,
}

impl CompletionConfig {
    /// True when no endpoint is configured and the mock client is used.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.endpoint.is_empty()
    }
}

/// Embedding service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding endpoint URL.
    pub endpoint: String,

    /// API key (empty to run in demo mode).
    pub api_key: String,

    /// Embedding model identifier.
    pub model: String,
}

impl EmbeddingConfig {
    /// True when no API key is configured and the mock client is used.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.api_key.is_empty()
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            api_key: String::new(),
            model: "text-embedding-ada-002".to_string(),
        }
    }
}

/// Remote datastore configuration.
///
/// Serves both the durable message log (`messages_table`) and the
/// vector-similarity RPC (`match_rpc`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatastoreConfig {
    /// Datastore base URL (empty to run in demo mode).
    pub url: String,

    /// Datastore API key (empty to run in demo mode).
    pub api_key: String,

    /// Table receiving the durable message log.
    pub messages_table: String,

    /// Name of the vector-similarity remote procedure.
    pub match_rpc: String,
}

impl DatastoreConfig {
    /// True when the datastore is not configured and mocks are used.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.url.is_empty() || self.api_key.is_empty()
    }
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            messages_table: "messages".to_string(),
            match_rpc: "match_documents".to_string(),
        }
    }
}

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Minimum similarity for a document to count as a match.
    pub match_threshold: f32,

    /// Maximum number of documents to retrieve per question.
    pub match_count: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.78,
            match_count: 5,
        }
    }
}

/// Chat behavior configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Assistant message seeded by a conversation reset.
    pub welcome_message: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_message: "Hi! Ask me anything and I'll do my best to help.".to_string(),
        }
    }
}

/// Get the default ragchat home directory.
fn default_ragchat_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".ragchat"), |h| h.join(".ragchat"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    // Try to load config file
    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    // Override with environment variables
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("RAGCHAT_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("RAGCHAT_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_ragchat_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    // Storage path
    if let Ok(path) = env::var("RAGCHAT_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("RAGCHAT_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    // Completion endpoint
    if let Ok(endpoint) = env::var("RAGCHAT_COMPLETION_ENDPOINT") {
        config.completion.endpoint = endpoint;
    }

    // Embedding service
    if let Ok(key) = env::var("OPENAI_API_KEY") {
        config.embedding.api_key = key;
    }
    if let Ok(endpoint) = env::var("RAGCHAT_EMBEDDING_ENDPOINT") {
        config.embedding.endpoint = endpoint;
    }
    if let Ok(model) = env::var("RAGCHAT_EMBEDDING_MODEL") {
        config.embedding.model = model;
    }

    // Datastore
    if let Ok(url) = env::var("SUPABASE_URL") {
        config.datastore.url = url;
    }
    if let Ok(key) = env::var("SUPABASE_ANON_KEY") {
        config.datastore.api_key = key;
    }

    // Retrieval
    if let Ok(val) = env::var("RAGCHAT_MATCH_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.retrieval.match_threshold = threshold;
        }
    }

    if let Ok(val) = env::var("RAGCHAT_MATCH_COUNT") {
        if let Ok(count) = val.parse() {
            config.retrieval.match_count = count;
        }
    }

    // Chat
    if let Ok(welcome) = env::var("RAGCHAT_WELCOME_MESSAGE") {
        config.chat.welcome_message = welcome;
    }
}
