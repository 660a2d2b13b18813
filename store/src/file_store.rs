//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`](crate::KeyValueStore) implementation
//! that persists the whole key space as a single flat TOML map. It is used on
//! desktop and mobile platforms to retain the session marker and local caches
//! across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── kv.toml        # flat string→string map, one entry per key
//! ```
//!
//! Every write loads the map, mutates it, serialises it, and replaces the file
//! via a temp-file + rename. A batch (`multi_set`/`multi_remove`) therefore
//! lands in one rename: a reader opening the file sees either the whole batch
//! or none of it, which is the atomicity the session marker relies on.
//!
//! ## Platform data directories
//!
//! Use a platform-appropriate base such as `dirs::data_dir()`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/hearth/` |
//! | Linux | `~/.local/share/hearth/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\hearth\` |

use std::collections::HashMap;
use std::path::PathBuf;

use crate::kv::{KeyValueStore, StoreError};

const MAP_FILE: &str = "kv.toml";

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn map_path(&self) -> PathBuf {
        self.base.join(MAP_FILE)
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match std::fs::read_to_string(self.map_path()) {
            Ok(text) => toml::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let text = toml::to_string(map).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let tmp = self.base.join(format!("{MAP_FILE}.tmp"));
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, self.map_path())?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.persist(&map)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.persist(&map)?;
        }
        Ok(())
    }

    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        let map = self.load()?;
        Ok(keys.iter().map(|k| map.get(*k).cloned()).collect())
    }

    async fn multi_set(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut map = self.load()?;
        for (k, v) in entries {
            map.insert(k.to_string(), v.to_string());
        }
        self.persist(&map)
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut map = self.load()?;
        let mut changed = false;
        for k in keys {
            changed |= map.remove(*k).is_some();
        }
        if changed {
            self.persist(&map)?;
        }
        Ok(())
    }

    async fn all_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> (PathBuf, FileStore) {
        let dir = std::env::temp_dir().join(format!("hearth_test_{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        (dir.clone(), FileStore::new(dir))
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let (dir, store) = temp_store("roundtrip");

        store
            .multi_set(&[("token", "abc"), ("userId", "42"), ("provider", "db")])
            .await
            .unwrap();

        // Re-open from same directory
        let store2 = FileStore::new(dir.clone());
        let values = store2
            .multi_get(&["provider", "token", "userId"])
            .await
            .unwrap();
        assert_eq!(
            values,
            vec![
                Some("db".to_string()),
                Some("abc".to_string()),
                Some("42".to_string())
            ]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_keys_with_prefix_separators_survive() {
        let (dir, store) = temp_store("prefix");

        store.set("list_items:db:42:milk", "2").await.unwrap();
        let keys = store.all_keys().await.unwrap();
        assert_eq!(keys, vec!["list_items:db:42:milk"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let (dir, store) = temp_store("empty");

        assert_eq!(store.get("token").await.unwrap(), None);
        assert!(store.all_keys().await.unwrap().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
