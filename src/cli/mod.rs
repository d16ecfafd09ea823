//! CLI command implementations.

pub mod chat;
pub mod history;
pub mod reset;
pub mod session;
