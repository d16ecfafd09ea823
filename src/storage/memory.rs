//! In-memory storage backend.
//!
//! Used by tests, and as the transparent fallback when the file backend
//! cannot be created (storage-unavailable degradation): state then lives
//! only for the current process.

use crate::core::Message;
use crate::error::Result;
use crate::storage::traits::HistoryStore;
use std::sync::RwLock;

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    session_id: RwLock<Option<String>>,
    messages: RwLock<Vec<Message>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryBackend {
    fn load_session_id(&self) -> Result<Option<String>> {
        let session_id = self.session_id.read().unwrap();
        Ok(session_id.clone())
    }

    fn save_session_id(&self, session_id: &str) -> Result<()> {
        let mut slot = self.session_id.write().unwrap();
        *slot = Some(session_id.to_string());
        Ok(())
    }

    fn load_messages(&self) -> Result<Vec<Message>> {
        let messages = self.messages.read().unwrap();
        Ok(messages.clone())
    }

    fn save_messages(&self, messages: &[Message]) -> Result<()> {
        let mut slot = self.messages.write().unwrap();
        *slot = messages.to_vec();
        Ok(())
    }
}
