//! Availability-checked persistence handle

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{JsonlStore, JsonlStoreConfig, MemoryStore, MessageStore, StoreError, StoreResult};
use crate::types::Message;

/// Parsed store connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// `memory://`
    Memory,
    /// `file://<dir>` or a bare directory path
    File(PathBuf),
}

impl StoreUrl {
    pub fn parse(url: &str) -> StoreResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::BackendUnavailable);
        }

        match url.split_once("://") {
            Some((scheme, rest)) => match scheme.to_ascii_lowercase().as_str() {
                "memory" | "mem" => Ok(StoreUrl::Memory),
                "file" if !rest.is_empty() => Ok(StoreUrl::File(PathBuf::from(rest))),
                "file" => Err(StoreError::UnsupportedScheme("file (missing path)".to_string())),
                other => Err(StoreError::UnsupportedScheme(other.to_string())),
            },
            None => Ok(StoreUrl::File(PathBuf::from(url))),
        }
    }

    /// Build the store this url points at
    pub fn open(&self, sync_writes: bool) -> Arc<dyn MessageStore> {
        match self {
            StoreUrl::Memory => Arc::new(MemoryStore::new()),
            StoreUrl::File(dir) => Arc::new(JsonlStore::new(
                JsonlStoreConfig::new(dir).sync_writes(sync_writes),
            )),
        }
    }
}

/// Persistence capability handed to the engine and the HTTP layer.
///
/// Availability is decided once, at construction. Failures after that are
/// reported per call.
#[derive(Clone)]
pub struct Backend {
    store: Option<Arc<dyn MessageStore>>,
    /// Newest timestamp found in the store at connect time
    latest: Option<DateTime<Utc>>,
}

impl Backend {
    /// A backend that never persists anything
    pub fn unavailable() -> Self {
        Self {
            store: None,
            latest: None,
        }
    }

    /// Wrap a store that is already known to be reachable
    pub fn with_store(store: Arc<dyn MessageStore>) -> Self {
        Self {
            store: Some(store),
            latest: None,
        }
    }

    /// Resolve a connection string and check the store once.
    ///
    /// Any problem leaves the backend unavailable and is logged; it never
    /// fails the caller.
    pub fn try_connect(url: Option<&str>, sync_writes: bool) -> Self {
        let Some(url) = url else {
            log::warn!("No store url configured, message persistence disabled");
            return Self::unavailable();
        };

        match StoreUrl::parse(url) {
            Ok(parsed) => Self::connect_store(parsed.open(sync_writes)),
            Err(e) => {
                log::warn!("Cannot use store url {:?}: {}; persistence disabled", url, e);
                Self::unavailable()
            }
        }
    }

    /// Ping `store` and keep it only if it answers
    pub fn connect_store(store: Arc<dyn MessageStore>) -> Self {
        match store.ping() {
            Ok(()) => {
                let latest = match store.find_all() {
                    Ok(messages) => messages.iter().map(|m| m.timestamp).max(),
                    Err(e) => {
                        log::warn!("Could not scan {} message store: {}", store.name(), e);
                        None
                    }
                };
                log::info!("Connected to {} message store", store.name());
                Self {
                    store: Some(store),
                    latest,
                }
            }
            Err(e) => {
                log::warn!(
                    "{} message store unreachable: {}; persistence disabled",
                    store.name(),
                    e
                );
                Self::unavailable()
            }
        }
    }

    /// Newest stored timestamp seen when the store was connected
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.latest
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Append a message to the store
    pub async fn save(&self, message: &Message) -> StoreResult<()> {
        let store = self.store.clone().ok_or(StoreError::BackendUnavailable)?;
        let message = message.clone();

        tokio::task::spawn_blocking(move || store.insert(&message))
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?
    }

    /// All stored messages, oldest first.
    ///
    /// Returns the single fallback sentinel when no store is available.
    pub async fn list_all(&self) -> StoreResult<Vec<Message>> {
        let Some(store) = self.store.clone() else {
            return Ok(vec![Message::unavailable_sentinel()]);
        };

        let mut messages = tokio::task::spawn_blocking(move || store.find_all())
            .await
            .map_err(|e| StoreError::Read(e.to_string()))??;

        // Stable: equal timestamps keep insertion order
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("store", &self.store.as_ref().map(|s| s.name()))
            .field("latest", &self.latest)
            .finish()
    }
}
