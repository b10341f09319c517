//! Live-update wire protocol.
//!
//! Every message is one JSON text frame:
//!
//! ```text
//! {"type":"update"}
//! {"type":"error","payload":"main.jsx:10:3\nExpected \";\""}
//! ```

use serde::{Deserialize, Serialize};

/// Message pushed from the dev server to every connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelMessage {
    /// A new bundle is available; hot-swap it.
    Update,
    /// The latest rebuild failed; show `payload`, keep running.
    Error { payload: String },
}

impl ChannelMessage {
    pub fn error(payload: impl Into<String>) -> Self {
        ChannelMessage::Error {
            payload: payload.into(),
        }
    }

    /// Encode as a single JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }
}
