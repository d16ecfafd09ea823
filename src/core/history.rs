//! Message log with dual persistence.
//!
//! The in-memory ordered list is the authoritative view. Every mutation
//! mirrors the whole list to the local [`HistoryStore`], and each appended
//! message is additionally sent to the remote [`MessageSink`] as a
//! detached fire-and-forget task. Local persistence failures degrade to
//! memory-only state; remote failures are logged and never retried.

use crate::core::Message;
use crate::remote::MessageSink;
use crate::storage::HistoryStore;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Ordered message list for one session, mirrored to local storage and a
/// remote durable log.
pub struct MessageLog {
    session_id: String,
    welcome_message: String,
    messages: Mutex<Vec<Message>>,
    local: Arc<dyn HistoryStore>,
    remote: Arc<dyn MessageSink>,
}

impl MessageLog {
    /// Open the log for `session_id`, loading any locally persisted
    /// messages. An unreadable local store starts the log empty.
    #[must_use]
    pub fn open(
        session_id: impl Into<String>,
        welcome_message: impl Into<String>,
        local: Arc<dyn HistoryStore>,
        remote: Arc<dyn MessageSink>,
    ) -> Self {
        let messages = match local.load_messages() {
            Ok(messages) => messages,
            Err(err) => {
                warn!("could not load persisted messages, starting empty: {err}");
                Vec::new()
            }
        };

        Self {
            session_id: session_id.into(),
            welcome_message: welcome_message.into(),
            messages: Mutex::new(messages),
            local,
            remote,
        }
    }

    /// Session this log belongs to.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Append a message: push in memory, mirror the full list locally,
    /// and send the record to the durable log without waiting on it.
    ///
    /// Must be called from within a tokio runtime (the remote append is a
    /// spawned task).
    pub fn append(&self, message: Message) {
        {
            let mut messages = self.messages.lock().unwrap();
            messages.push(message.clone());
            if let Err(err) = self.local.save_messages(&messages) {
                warn!("local persistence failed, keeping in-memory state: {err}");
            }
        }

        let sink = Arc::clone(&self.remote);
        tokio::spawn(async move {
            if let Err(err) = sink.insert(&message).await {
                warn!("durable log insert failed: {err}");
            }
        });
    }

    /// Ordered snapshot of all messages.
    #[must_use]
    pub fn all(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    /// Number of messages in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// True when the log holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().unwrap().is_empty()
    }

    /// Clear the conversation to a single fresh assistant welcome message.
    /// The session identifier is unchanged.
    pub fn reset(&self) {
        let welcome = Message::assistant(&self.welcome_message, &self.session_id);
        let mut messages = self.messages.lock().unwrap();
        messages.clear();
        messages.push(welcome);
        if let Err(err) = self.local.save_messages(&messages) {
            warn!("local persistence failed, keeping in-memory state: {err}");
        }
    }
}
