//! Data types for the chat server
//!
//! This module contains the core data structures shared by the registry,
//! the broadcast engine, the store and the HTTP layer.

mod connection;
mod message;

pub use connection::ConnectionId;
pub use message::{Ack, Message, SYSTEM_SENDER, UNAVAILABLE_TEXT};
