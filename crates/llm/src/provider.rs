use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

/// A chat message for the completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A lazy, finite sequence of generated-text fragments. Consuming it blocks
/// per fragment; it cannot be restarted.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// A completion response, in whichever mode the backend returned it.
pub enum Completion {
    /// The whole response body at once.
    Full(String),
    /// Incremental fragments as the backend produces them.
    Streamed(FragmentStream),
}

impl Completion {
    /// Drain the response into a single string. `Full` responses pass
    /// through; streamed ones are consumed to the end.
    pub async fn collect(self) -> Result<String, LlmError> {
        match self {
            Completion::Full(text) => Ok(text),
            Completion::Streamed(mut fragments) => {
                use futures::StreamExt;
                let mut full = String::new();
                while let Some(fragment) = fragments.next().await {
                    full.push_str(&fragment?);
                }
                Ok(full)
            }
        }
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Full(text) => f.debug_tuple("Full").field(text).finish(),
            Completion::Streamed(_) => f.write_str("Streamed(..)"),
        }
    }
}

/// Trait for completion backends — each implements a single entry point
/// taking a system instruction and a user text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a chat completion request. With `stream` set, the backend
    /// returns fragments as they are generated; otherwise the whole body.
    async fn invoke(&self, system: &str, user: &str, stream: bool)
        -> Result<Completion, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    Api { status: u16, body: String },
    #[error("stream error: {0}")]
    Stream(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
}
