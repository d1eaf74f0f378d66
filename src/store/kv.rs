//! File-backed key-value persistence.
//!
//! One JSON object on disk, rewritten in full on every mutation. There are
//! no transactions and no multi-key atomicity; anything spanning several
//! logical fields has to be serialized into a single value by the caller.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed store file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String-keyed, string-valued store. A failed write is logged and
/// otherwise silent: the in-memory map stays the source of truth for the
/// rest of the session.
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`, reading existing entries. A missing file
    /// is an empty store; an unreadable one is discarded.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("discarding unreadable store at {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
        self.flush();
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.flush();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.flush();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) {
        if let Err(e) = self.try_flush() {
            warn!("store write failed, keeping in-memory state: {e}");
        }
    }

    fn try_flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("store.json")
    }

    #[test]
    fn set_get_roundtrip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        let mut store = KvStore::open(&path);
        store.set("recipient_name", "Alex");
        store.set("volume", "0.50");

        let reopened = KvStore::open(&path);
        assert_eq!(reopened.get("recipient_name").as_deref(), Some("Alex"));
        assert_eq!(reopened.get("volume").as_deref(), Some("0.50"));
    }

    #[test]
    fn remove_deletes_a_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KvStore::open(store_path(&dir));
        store.set("a", "1");
        store.set("b", "2");
        store.remove("a");

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn clear_empties_the_store_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        let mut store = KvStore::open(&path);
        store.set("a", "1");
        store.clear();

        let reopened = KvStore::open(&path);
        assert_eq!(reopened.get("a"), None);
        assert!(reopened.is_empty());
    }

    #[test]
    fn unreadable_file_is_discarded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(&path, "{not json").unwrap();

        let store = KvStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_parent_directory_is_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = KvStore::open(&path);
        store.set("k", "v");

        assert_eq!(KvStore::open(&path).get("k").as_deref(), Some("v"));
    }
}
