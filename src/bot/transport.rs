use async_trait::async_trait;
use thiserror::Error;

use crate::core::cards::Attachment;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The chat API answered with an error payload.
    #[error("Chat API error in {method}: {message}")]
    Api { method: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No chat token configured")]
    MissingToken,

    #[error("Not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// A message seen in a watched channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub channel: String,
    pub text: String,
}

/// What the bot posts back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Attachments(Vec<Attachment>),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

/// Chat platform connection.
#[async_trait]
pub trait ChatTransport: Send {
    /// (Re)establish the session.
    async fn connect(&mut self) -> Result<()>;

    /// Messages that arrived since the previous call, oldest first.
    async fn receive(&mut self) -> Result<Vec<IncomingMessage>>;

    async fn send(&self, channel: &str, reply: &Reply) -> Result<()>;
}
