//! Real-time chat core
//!
//! - `registry`: connected clients and their outbound queues
//! - `engine`: stamp, persist and fan out incoming chat messages
//! - `events`: JSON frames exchanged over the WebSocket

pub mod engine;
pub mod events;
pub mod registry;

pub use engine::{BroadcastEngine, Delivery};
pub use events::{ChatPayload, ClientMessage, ServerMessage, CHAT_EVENT};
pub use registry::ConnectionRegistry;
