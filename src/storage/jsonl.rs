//! JSON-lines document store
//!
//! Each message is one JSON document on its own line of `messages.jsonl`.
//! The file is only ever appended to.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{MessageStore, StoreResult};
use crate::types::Message;

/// Configuration for the JsonlStore
#[derive(Debug, Clone)]
pub struct JsonlStoreConfig {
    /// Path to the data directory
    pub data_dir: PathBuf,
    /// Whether to fsync after every append
    pub sync_writes: bool,
}

impl Default for JsonlStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sync_writes: true,
        }
    }
}

impl JsonlStoreConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Toggle fsync after each append
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to messages.jsonl
    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join("messages.jsonl")
    }
}

/// Append-only message store on the local filesystem
pub struct JsonlStore {
    config: JsonlStoreConfig,
    /// Serializes appends so lines never interleave
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(config: JsonlStoreConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &JsonlStoreConfig {
        &self.config
    }

    fn open_for_append(&self) -> StoreResult<File> {
        let path = self.config.messages_path();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(OpenOptions::new().create(true).append(true).open(&path)?)
    }
}

impl MessageStore for JsonlStore {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn ping(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        self.open_for_append()?;
        Ok(())
    }

    fn insert(&self, message: &Message) -> StoreResult<()> {
        let json_line = message.to_json_line()?;

        let _guard = self.write_lock.lock();
        let mut file = self.open_for_append()?;
        writeln!(file, "{}", json_line)?;

        if self.config.sync_writes {
            file.sync_all()?;
        }

        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<Message>> {
        let path = self.config.messages_path();

        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut messages = Vec::new();

        for (line_num, line_result) in reader.split(b'\n').enumerate() {
            let raw = line_result?;
            let line = match std::str::from_utf8(&raw) {
                Ok(line) => line,
                Err(e) => {
                    log::warn!(
                        "Skipping non UTF-8 line at {}:{}: {}",
                        path.display(),
                        line_num + 1,
                        e
                    );
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match Message::from_json_line(line) {
                Ok(message) => messages.push(message),
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable message at {}:{}: {}",
                        path.display(),
                        line_num + 1,
                        e
                    );
                }
            }
        }

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnectionId;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (JsonlStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::new(JsonlStoreConfig::new(dir.path()).sync_writes(false));
        (store, dir)
    }

    #[test]
    fn test_find_all_without_file_is_empty() {
        let (store, _dir) = setup();
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_ping_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("chat");
        let store = JsonlStore::new(JsonlStoreConfig::new(&nested));

        store.ping().unwrap();
        assert!(store.config().messages_path().exists());
    }

    #[test]
    fn test_insert_appends_one_line_per_message() {
        let (store, _dir) = setup();
        let sender = ConnectionId::new();

        store.insert(&Message::new(&sender, "hello", Utc::now())).unwrap();
        store.insert(&Message::new(&sender, "world", Utc::now())).unwrap();

        let content = std::fs::read_to_string(store.config().messages_path()).unwrap();
        assert_eq!(content.lines().count(), 2);

        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "hello");
        assert_eq!(all[1].sender_id, sender.to_string());
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let (store, _dir) = setup();
        let sender = ConnectionId::new();
        store.insert(&Message::new(&sender, "before", Utc::now())).unwrap();

        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(store.config().messages_path())
                .unwrap();
            writeln!(file, "{{not json").unwrap();
            writeln!(file).unwrap();
        }

        store.insert(&Message::new(&sender, "after", Utc::now())).unwrap();

        let texts: Vec<_> = store.find_all().unwrap().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["before", "after"]);
    }

    #[test]
    fn test_invalid_utf8_lines_are_skipped() {
        let (store, _dir) = setup();
        let sender = ConnectionId::new();
        store.insert(&Message::new(&sender, "before", Utc::now())).unwrap();

        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(store.config().messages_path())
                .unwrap();
            file.write_all(b"\xff\xfe garbage\n").unwrap();
        }

        store.insert(&Message::new(&sender, "after", Utc::now())).unwrap();

        let texts: Vec<_> = store.find_all().unwrap().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["before", "after"]);
    }

    #[test]
    fn test_reopen_sees_previous_messages() {
        let dir = TempDir::new().unwrap();
        let sender = ConnectionId::new();

        {
            let store = JsonlStore::new(JsonlStoreConfig::new(dir.path()));
            store.insert(&Message::new(&sender, "persisted", Utc::now())).unwrap();
        }

        let store = JsonlStore::new(JsonlStoreConfig::new(dir.path()));
        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "persisted");
    }
}
