//! Key-value storage standing in for the browser's local storage
//!
//! Collections live under fixed keys as JSON arrays and are always read and rewritten
//! whole. There is no locking: two writers racing on the same key lose one update.

use crate::error::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const USERS_KEY: &str = "users";
pub const PRODUCTS_KEY: &str = "products";
pub const BIDS_KEY: &str = "bids";
/// Session pointer: the signed-in user's email
pub const CURRENT_USER_KEY: &str = "currentUser";

/// String-keyed, string-valued store
pub trait KeyValueStore {
    /// Value under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Insert or overwrite `key`
    fn set(&mut self, key: &str, value: String) -> CoreResult<()>;
    /// Remove `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> CoreResult<()>;
}

/// In-memory store, mainly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file. A missing file opens as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| CoreError::Serialization {
                    key: path.to_string_lossy().to_string(),
                    message: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };
        log::debug!("Opened storage at {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole store to a sibling temp file and rename it over `path`
    fn persist(&self) -> CoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            CoreError::Serialization {
                key: self.path.to_string_lossy().to_string(),
                message: e.to_string(),
            }
        })?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> CoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Read a non-empty value; an empty string counts as absent
pub fn get_present(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    store.get(key).filter(|value| !value.is_empty())
}

/// Read the JSON array under `key`. An absent key reads as an empty collection.
pub fn read_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Vec<T>> {
    match get_present(store, key) {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| CoreError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

/// Replace the whole collection under `key`
pub fn write_collection<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> CoreResult<()> {
    let raw = serde_json::to_string(items).map_err(|e| CoreError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    log::debug!("Writing {} entries to '{}'", items.len(), key);
    store.set(key, raw)
}

/// Make sure `users`, `products` and `bids` exist, without touching existing data
pub fn initialize_storage(store: &mut dyn KeyValueStore) -> CoreResult<()> {
    for key in [USERS_KEY, PRODUCTS_KEY, BIDS_KEY] {
        if get_present(store, key).is_none() {
            log::debug!("Initializing empty collection '{}'", key);
            store.set(key, "[]".to_string())?;
        }
    }
    Ok(())
}
