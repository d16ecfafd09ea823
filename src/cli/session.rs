//! `ragchat session` command implementation.

use crate::config::load_config;
use crate::core::get_or_create_session_id;
use crate::error::Result;
use crate::storage::FileBackend;

/// Run the session command.
///
/// Prints the stable session identifier, creating one on first use.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be created.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let store = FileBackend::new(config.storage.path)?;

    println!("{}", get_or_create_session_id(&store));

    Ok(())
}
