use super::files::{atomic_write, read_file};
#[cfg(test)]
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed key the board is stored under
pub const STATE_KEY: &str = "zen_focus_v2";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage key {0:?} is not a valid file name")]
    InvalidKey(String),
    #[error("failed to read {key}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {key}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode board")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value store, the local equivalent of browser storage
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One JSON file per key inside the data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        read_file(&path).map_err(|source| StoreError::Read {
            key: key.to_string(),
            source,
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        atomic_write(&path, value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
