//! Key-value persistence port and its adapters.
//!
//! `EventStore` only needs a string `get`/`set` keyed by name, the shape of a
//! browser's local storage. Anything that can remember a string under a key
//! can back it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::EvcalResult;

/// Default entry holding the serialized event list.
pub const DEFAULT_STORAGE_KEY: &str = "events";

pub trait Storage {
    /// Read the value stored under `key`, `None` if nothing was ever stored.
    fn get(&self, key: &str) -> EvcalResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> EvcalResult<()>;
}

/// In-process storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> EvcalResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EvcalResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> EvcalResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> EvcalResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Written to a sibling file, then renamed over the entry
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("events").unwrap(), None);

        storage.set("events", "[]").unwrap();
        assert_eq!(storage.get("events").unwrap().as_deref(), Some("[]"));

        storage.set("events", "[1]").unwrap();
        assert_eq!(storage.get("events").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let mut storage = FileStorage::new(&dir);

        assert_eq!(storage.get("events").unwrap(), None);

        storage.set("events", r#"[{"name":"x"}]"#).unwrap();
        assert!(dir.join("events.json").exists());
        assert!(!dir.join(".events.json.tmp").exists());
        assert_eq!(
            storage.get("events").unwrap().as_deref(),
            Some(r#"[{"name":"x"}]"#)
        );
    }

    #[test]
    fn test_file_storage_keys_are_separate() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path());

        storage.set("events", "a").unwrap();
        storage.set("archive", "b").unwrap();

        assert_eq!(storage.get("events").unwrap().as_deref(), Some("a"));
        assert_eq!(storage.get("archive").unwrap().as_deref(), Some("b"));
    }
}
