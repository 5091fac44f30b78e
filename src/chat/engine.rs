//! Broadcast engine

use std::sync::Arc;

use super::events::ServerMessage;
use super::registry::ConnectionRegistry;
use crate::storage::Backend;
use crate::types::{Ack, ConnectionId, Message};
use crate::utils::MonotonicClock;

/// Outcome of handling one incoming chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// The message as broadcast
    pub message: Message,
    /// Number of connections the message was queued for
    pub recipients: usize,
    /// Whether the store accepted the message
    pub persisted: bool,
}

impl Delivery {
    /// Acknowledgement for the sender. Reflects delivery, not persistence.
    pub fn ack(&self) -> Ack {
        Ack::ok()
    }
}

/// Stamps, persists and fans out chat messages
#[derive(Debug)]
pub struct BroadcastEngine {
    registry: Arc<ConnectionRegistry>,
    backend: Backend,
    clock: MonotonicClock,
}

impl BroadcastEngine {
    /// The clock starts no earlier than the newest stored message, so
    /// insertion order stays non-decreasing across restarts.
    pub fn new(registry: Arc<ConnectionRegistry>, backend: Backend) -> Self {
        let clock = MonotonicClock::starting_at(backend.latest_timestamp());
        Self {
            registry,
            backend,
            clock,
        }
    }

    /// Handle a chat message from `sender`.
    ///
    /// Persistence is best effort: a failed write is logged and the message
    /// is still broadcast to every connection, the sender included.
    pub async fn handle_incoming(&self, sender: ConnectionId, text: String) -> Delivery {
        let message = Message::new(&sender, text, self.clock.now());

        let persisted = if self.backend.is_available() {
            match self.backend.save(&message).await {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Failed to persist message from {}: {}", sender, e);
                    false
                }
            }
        } else {
            false
        };

        let recipients = self.registry.broadcast(&ServerMessage::ChatMessage {
            data: message.clone(),
        });
        log::debug!("Broadcast message from {} to {} connections", sender, recipients);

        Delivery {
            message,
            recipients,
            persisted,
        }
    }
}
