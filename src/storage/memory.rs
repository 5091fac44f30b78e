//! In-memory message store

use parking_lot::RwLock;

use super::{MessageStore, StoreResult};
use crate::types::Message;

/// Keeps messages in a vector for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl MessageStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn insert(&self, message: &Message) -> StoreResult<()> {
        self.messages.write().push(message.clone());
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<Message>> {
        Ok(self.messages.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnectionId;
    use chrono::Utc;

    #[test]
    fn test_insert_and_find_all() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let sender = ConnectionId::new();
        store.insert(&Message::new(&sender, "one", Utc::now())).unwrap();
        store.insert(&Message::new(&sender, "two", Utc::now())).unwrap();

        let all = store.find_all().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(all[0].text, "one");
        assert_eq!(all[1].text, "two");
    }
}
