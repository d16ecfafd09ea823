//! Durable message log sink.
//!
//! Write-only: each message is appended as one `{session_id, role, content}`
//! record. There is no read path; local storage remains the read source.

use crate::core::Message;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Appends messages to a remote durable log.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Append one message record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    /// Callers treat this as best-effort and only log the failure.
    async fn insert(&self, message: &Message) -> Result<()>;
}

#[derive(Serialize)]
struct MessageRecord<'a> {
    session_id: &'a str,
    role: &'static str,
    content: &'a str,
}

/// Sink inserting rows into a datastore table
/// (`POST {url}/rest/v1/{table}`).
pub struct HttpMessageSink {
    client: Client,
    url: String,
    api_key: String,
    table: String,
}

impl HttpMessageSink {
    /// Create a sink for the datastore at `url`.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }
}

#[async_trait]
impl MessageSink for HttpMessageSink {
    async fn insert(&self, message: &Message) -> Result<()> {
        let records = [MessageRecord {
            session_id: &message.session_id,
            role: message.role.as_str(),
            content: &message.content,
        }];

        let response = self
            .client
            .post(format!("{}/rest/v1/{}", self.url, self.table))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
            .json(&records)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read insert error body".to_string());
            return Err(Error::Endpoint { status, message });
        }

        Ok(())
    }
}

/// Sink used when no datastore is configured. Accepts and discards.
#[derive(Debug, Default)]
pub struct NullMessageSink;

#[async_trait]
impl MessageSink for NullMessageSink {
    async fn insert(&self, _message: &Message) -> Result<()> {
        Ok(())
    }
}
