//! Chat wire format
//!
//! Inbound: a JSON object with a required `message` string. Other fields
//! (htmx's ws extension adds `HEADERS`) are ignored.
//! Outbound: the rendered HTML fragment as a text frame.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("frame is not valid UTF-8")]
    NotUtf8,

    #[error("invalid chat payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to render chat message: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    pub message: String,
}

impl InboundMessage {
    pub fn decode(raw: &str) -> Result<Self, ChatError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn decode_bytes(raw: &[u8]) -> Result<Self, ChatError> {
        let text = std::str::from_utf8(raw).map_err(|_| ChatError::NotUtf8)?;
        Self::decode(text)
    }
}
