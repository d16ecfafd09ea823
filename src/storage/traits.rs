//! Storage trait definitions.

use crate::core::Message;
use crate::error::Result;

/// Local persistent storage for the chat widget.
///
/// Two key-value slots: the session identifier and the serialized ordered
/// message list. The message slot is overwritten wholesale on every
/// mutation so a reload always observes the last persisted view.
pub trait HistoryStore: Send + Sync {
    /// Get the stored session identifier, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn load_session_id(&self) -> Result<Option<String>>;

    /// Persist the session identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save_session_id(&self, session_id: &str) -> Result<()>;

    /// Get the persisted message list in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn load_messages(&self) -> Result<Vec<Message>>;

    /// Overwrite the persisted message list.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save_messages(&self, messages: &[Message]) -> Result<()>;
}
