//! Chat Server
//!
//! A minimal real-time chat backend: clients connect over WebSocket, every
//! chat message is stamped server-side, optionally persisted, and broadcast
//! to every connected client including the sender.
//!
//! # Modules
//!
//! - `types`: Core data structures (Message, ConnectionId)
//! - `chat`: Connection registry, broadcast engine and wire frames
//! - `storage`: Message stores and the availability-checked `Backend`
//! - `api`: Axum router, WebSocket handler and REST endpoints
//! - `config`: Command line / environment configuration
//! - `server`: Listener binding and graceful shutdown
//! - `utils`: Utility functions (monotonic clock)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chat_server::{AppState, Backend, ChatServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chat_server::ServerError> {
//!     let backend = Backend::try_connect(Some("memory://"), true);
//!     let state = Arc::new(AppState::new(backend));
//!     let server = ChatServer::bind("127.0.0.1:9000".parse().unwrap(), state).await?;
//!     server.run().await
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod server;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use chat::{BroadcastEngine, ConnectionRegistry, Delivery};
pub use config::Config;
pub use server::{ChatServer, ServerError, ServerResult};
pub use storage::{Backend, MessageStore, StoreError, StoreResult};
pub use types::{Ack, ConnectionId, Message};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
