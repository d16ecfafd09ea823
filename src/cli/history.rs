//! `ragchat history` command implementation.

use crate::config::load_config;
use crate::error::Result;
use crate::storage::{FileBackend, HistoryStore};
use chrono::{DateTime, Local, Utc};

/// Run the history command.
///
/// Prints the locally persisted conversation in order.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let store = FileBackend::new(config.storage.path.clone())?;

    let messages = store.load_messages()?;

    if messages.is_empty() {
        println!("No messages yet.");
        println!("\nHistory is stored in: {}", config.storage.path.display());
        return Ok(());
    }

    for message in &messages {
        println!(
            "{} [{}] {}",
            format_local_time(message.created_at),
            message.role.as_str(),
            message.content
        );
    }

    println!("\n{} message(s)", messages.len());

    Ok(())
}

/// Format UTC time as local time for display.
fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
