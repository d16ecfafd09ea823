//! `ragchat chat` command implementation.
//!
//! Interactive REPL driving a full controller; the terminal equivalent of
//! the embedded widget.

use crate::config::load_config;
use crate::core::{ChatController, IgnoreReason, SubmitOutcome};
use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Run the chat command.
///
/// Reads questions line by line; `:reset` starts a fresh conversation,
/// `:quit` exits. Completion failures are printed and the conversation
/// continues with the question preserved for manual resubmission.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or stdin fails.
pub async fn run() -> Result<()> {
    let config = load_config()?;
    let controller = ChatController::from_config(&config);

    println!("ragchat session {}", controller.session_id());
    println!("Type a question, :reset to start over, :quit to exit.\n");

    for message in controller.messages() {
        println!("[{}] {}", message.role.as_str(), message.content);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            ":quit" | ":q" => break,
            ":reset" => {
                controller.reset();
                for message in controller.messages() {
                    println!("[{}] {}", message.role.as_str(), message.content);
                }
                continue;
            }
            _ => {}
        }

        match controller.submit(&line).await {
            Ok(SubmitOutcome::Answered(reply)) => {
                println!("[assistant] {}", reply.content);
            }
            Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyInput)) => {}
            Ok(SubmitOutcome::Ignored(IgnoreReason::TurnInFlight)) => {
                println!("(a reply is still pending)");
            }
            Err(err) => {
                eprintln!("ragchat: completion failed: {err}");
                eprintln!("Your message was kept; submit again to retry.");
            }
        }
    }

    Ok(())
}
