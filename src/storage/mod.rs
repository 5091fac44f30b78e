//! Message persistence
//!
//! This module provides the persistence backend behind the broadcast engine:
//! - `MessageStore`: append-only store of chat messages
//! - `JsonlStore`: document store backed by a `messages.jsonl` file
//! - `MemoryStore`: in-process store, used for `memory://` and tests
//! - `Backend`: availability-checked handle injected into the engine and API
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌──────────────┐    ┌───────────────────┐
//! │ Broadcast│───►│ Backend.save │───►│ append to         │
//! │ Engine   │    │ (if online)  │    │ messages.jsonl    │
//! └──────────┘    └──────────────┘    └───────────────────┘
//!
//! Read Path:
//! ┌──────────────┐    ┌──────────────────┐
//! │ GET /api/    │───►│ Backend.list_all │───► sorted by timestamp
//! │ messages     │    │ or sentinel      │
//! └──────────────┘    └──────────────────┘
//! ```

mod backend;
mod jsonl;
mod memory;

pub use backend::{Backend, StoreUrl};
pub use jsonl::{JsonlStore, JsonlStoreConfig};
pub use memory::MemoryStore;

use crate::types::Message;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("persistence backend unavailable")]
    BackendUnavailable,
    #[error("unsupported store url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Write(String),
    #[error("read failed: {0}")]
    Read(String),
}

/// An append-only store of chat messages
///
/// Implementations are synchronous; `Backend` runs them on the blocking pool.
pub trait MessageStore: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Check that the store is reachable
    fn ping(&self) -> StoreResult<()>;

    /// Append a message
    fn insert(&self, message: &Message) -> StoreResult<()>;

    /// All stored messages in insertion order
    fn find_all(&self) -> StoreResult<Vec<Message>>;
}
