//! File-based storage backend.

use crate::core::Message;
use crate::error::Result;
use crate::storage::traits::HistoryStore;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage backend with atomic writes.
///
/// Layout under the base directory: `session_id` holds the raw identifier,
/// `messages.json` holds the serialized ordered message list.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn session_id_path(&self) -> PathBuf {
        self.base_dir.join("session_id")
    }

    fn messages_path(&self) -> PathBuf {
        self.base_dir.join("messages.json")
    }

    /// Write contents to a file via a temp file and atomic rename.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let temp = path.with_extension("tmp");

        // Write to temp file first
        fs::write(&temp, contents)?;

        // Atomic rename - prevents corruption if process crashes mid-write
        fs::rename(&temp, path)?;

        Ok(())
    }
}

impl HistoryStore for FileBackend {
    fn load_session_id(&self) -> Result<Option<String>> {
        let path = self.session_id_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(trimmed.to_string()))
    }

    fn save_session_id(&self, session_id: &str) -> Result<()> {
        self.write_atomic(&self.session_id_path(), session_id)
    }

    fn load_messages(&self) -> Result<Vec<Message>> {
        let path = self.messages_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let messages: Vec<Message> = serde_json::from_str(&contents)?;
        Ok(messages)
    }

    fn save_messages(&self, messages: &[Message]) -> Result<()> {
        let contents = serde_json::to_string_pretty(messages)?;
        self.write_atomic(&self.messages_path(), &contents)
    }
}
