//! Chat message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConnectionId;

/// Sender id used for messages the server produces itself
pub const SYSTEM_SENDER: &str = "System";

/// Text of the placeholder returned when no store is reachable
pub const UNAVAILABLE_TEXT: &str = "<backend unavailable>";

/// A chat message as broadcast to clients and persisted to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    /// Server-side time the message was broadcast
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message sent by a connected client
    pub fn new(sender: &ConnectionId, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            sender_id: sender.to_string(),
            timestamp,
        }
    }

    /// Placeholder returned from history when persistence is disabled
    pub fn unavailable_sentinel() -> Self {
        Self {
            text: UNAVAILABLE_TEXT.to_string(),
            sender_id: SYSTEM_SENDER.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Whether this message is the unavailable-backend placeholder
    pub fn is_sentinel(&self) -> bool {
        self.sender_id == SYSTEM_SENDER && self.text == UNAVAILABLE_TEXT
    }

    /// Serialize to a single JSON line
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON line
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Acknowledgement payload sent back to a client after a broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
