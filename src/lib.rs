//! ragchat - session and message-persistence core for an embeddable RAG
//! chat widget.
//!
//! Renders no UI itself: it owns the session identity, the dual-persisted
//! message log, the retrieval pipeline, and the one-turn-at-a-time
//! completion round-trip that a widget front-end drives.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod rag;
pub mod remote;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
