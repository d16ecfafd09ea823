//! Message value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The visitor typing into the widget.
    User,

    /// The completion endpoint's reply.
    Assistant,
}

impl Role {
    /// Wire name of the role, as stored in the durable log.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat message. Immutable once created; ordering is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,

    /// Author role.
    pub role: Role,

    /// Message text.
    pub content: String,

    /// Conversation this message belongs to.
    pub session_id: String,

    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a fresh message.
    #[must_use]
    pub fn new(role: Role, content: &str, session_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.to_string(),
            session_id: session_id.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: &str, session_id: &str) -> Self {
        Self::new(Role::User, content, session_id)
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: &str, session_id: &str) -> Self {
        Self::new(Role::Assistant, content, session_id)
    }
}
