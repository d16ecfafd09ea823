//! Core chat session logic.

pub mod controller;
pub mod history;
pub mod message;
pub mod session;

pub use controller::{ChatController, IgnoreReason, Phase, SubmitOutcome};
pub use history::MessageLog;
pub use message::{Message, Role};
pub use session::get_or_create_session_id;
