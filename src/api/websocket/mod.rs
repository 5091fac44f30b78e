//! WebSocket module for real-time chat
//!
//! Provides the `/ws` endpoint. Each connection is registered with the
//! connection registry for its lifetime and receives every broadcast.

pub mod handler;
pub mod state;

pub use handler::ws_handler;
pub use state::AppState;
