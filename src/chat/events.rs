//! WebSocket frame types
//!
//! Every frame is a JSON object tagged by `event`.

use serde::{Deserialize, Serialize};

use crate::types::{Ack, ConnectionId, Message};

/// Canonical name of the chat event in both directions
pub const CHAT_EVENT: &str = "chat_message";

/// Frames sent by clients
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A chat message to broadcast
    ChatMessage {
        data: ChatPayload,
        /// Ack id; when present the server answers with a matching `ack` frame
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ack: Option<u64>,
    },

    /// Ping for heartbeat
    Ping,
}

/// Chat payload: a bare string or `{ "text": ... }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatPayload {
    Text(String),
    Object { text: String },
}

impl ChatPayload {
    pub fn into_text(self) -> String {
        match self {
            ChatPayload::Text(text) | ChatPayload::Object { text } => text,
        }
    }
}

/// Frames sent by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after the upgrade
    Connected { id: ConnectionId },

    /// A broadcast chat message
    ChatMessage { data: Message },

    /// Acknowledges a client `chat_message` that carried an ack id
    Ack { id: u64, data: Ack },

    /// Pong response
    Pong,

    /// A client frame could not be handled
    Error { code: String, message: String },
}

impl ServerMessage {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: "bad_request".to_string(),
            message: message.into(),
        }
    }
}
