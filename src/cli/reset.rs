//! `ragchat reset` command implementation.

use crate::config::load_config;
use crate::core::{get_or_create_session_id, MessageLog};
use crate::error::Result;
use crate::remote::NullMessageSink;
use crate::storage::FileBackend;
use std::sync::Arc;

/// Run the reset command.
///
/// Replaces the stored conversation with the single welcome message. The
/// session identifier is preserved.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be created.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let store = Arc::new(FileBackend::new(config.storage.path)?);

    let session_id = get_or_create_session_id(store.as_ref());
    let log = MessageLog::open(
        session_id,
        config.chat.welcome_message,
        store,
        Arc::new(NullMessageSink),
    );
    log.reset();

    println!("Conversation reset.");

    Ok(())
}
