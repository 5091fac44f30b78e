//! Shared application state

use std::sync::Arc;

use crate::chat::{BroadcastEngine, ConnectionRegistry};
use crate::storage::Backend;

/// State shared by the WebSocket and REST handlers
#[derive(Debug)]
pub struct AppState {
    /// Currently connected clients
    pub registry: Arc<ConnectionRegistry>,

    /// Persistence capability, decided at startup
    pub backend: Backend,

    /// Fans incoming messages out to `registry`
    pub engine: BroadcastEngine,
}

impl AppState {
    /// Create a new AppState around the given backend
    pub fn new(backend: Backend) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let engine = BroadcastEngine::new(registry.clone(), backend.clone());

        Self {
            registry,
            backend,
            engine,
        }
    }
}
