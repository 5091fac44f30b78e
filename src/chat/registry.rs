//! Connection registry
//!
//! Each connected client owns an unbounded outbound queue. Broadcasting
//! pushes a clone of the frame onto every queue; the connection's task
//! drains its queue onto the socket.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use super::events::ServerMessage;
use crate::types::ConnectionId;

/// Sending half of a connection's outbound queue
pub type Outbound = mpsc::UnboundedSender<ServerMessage>;

/// Receiving half, drained by the connection task
pub type Inbox = mpsc::UnboundedReceiver<ServerMessage>;

/// Tracks currently connected clients
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Outbound>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and hand back its id and inbox
    pub fn connect(&self) -> (ConnectionId, Inbox) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let total = {
            let mut connections = self.connections.write();
            connections.insert(id, tx);
            connections.len()
        };

        log::info!("User connected: {} ({} online)", id, total);
        (id, rx)
    }

    /// Forget a connection. Unknown ids are ignored.
    pub fn disconnect(&self, id: &ConnectionId) -> bool {
        let (removed, total) = {
            let mut connections = self.connections.write();
            let removed = connections.remove(id).is_some();
            (removed, connections.len())
        };

        if removed {
            log::info!("User disconnected: {} ({} online)", id, total);
        } else {
            log::debug!("Disconnect for unknown connection {}", id);
        }
        removed
    }

    /// Queue `frame` for every registered connection.
    ///
    /// Returns how many connections it was queued for.
    pub fn broadcast(&self, frame: &ServerMessage) -> usize {
        let connections = self.connections.read();
        connections
            .iter()
            .filter(|(id, tx)| {
                let queued = tx.send(frame.clone()).is_ok();
                if !queued {
                    log::debug!("Skipping closed connection {}", id);
                }
                queued
            })
            .count()
    }

    /// Queue `frame` for one connection
    pub fn send_to(&self, id: &ConnectionId, frame: ServerMessage) -> bool {
        match self.connections.read().get(id) {
            Some(tx) => tx.send(frame).is_ok(),
            None => false,
        }
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.read().contains_key(id)
    }

    /// Number of connected clients
    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }
}
