//! Key/value persistence for widget state.
//!
//! Widgets persist through the [`Storage`] trait, a string-to-string store
//! with the same shape as a browser's local storage. Each widget owns one
//! key and writes its whole list there after every mutation.
//!
//! - [`FileStorage`] keeps one JSON file per key under a data directory.
//! - [`MemoryStorage`] keeps values in a map (tests, ephemeral runs).
//!
//! [`load_line_items`] and [`save_line_items`] hold the JSON encoding of a
//! line-item list so both widgets hydrate and persist the same way.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use coffee_shop_core::LineItem;
use thiserror::Error;

/// Storage key for the cart widget.
pub const CART_KEY: &str = "coffeeShopCart";

/// Storage key for the orders widget.
pub const ORDERS_KEY: &str = "coffeeShopOrders";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("failed to encode line items: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key/value store.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: `<dir>/<key>.json` per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Readers see either the previous or the new value, never a partial write.
        let tmp = path.with_extension("json.tmp");
        let io_err = |source: io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// Hydrate a line-item list from `key`.
///
/// A missing value, a backend read error or a value that is not a JSON array
/// of line items all yield an empty list.
#[must_use]
pub fn load_line_items(storage: &dyn Storage, key: &str) -> Vec<LineItem> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted line items");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<LineItem>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed persisted line items");
            Vec::new()
        }
    }
}

/// Persist `items` under `key` as a JSON array.
///
/// # Errors
///
/// Returns an error if encoding or the backend write fails.
pub fn save_line_items(
    storage: &dyn Storage,
    key: &str,
    items: &[LineItem],
) -> Result<(), StorageError> {
    let value = serde_json::to_string(items)?;
    storage.set_item(key, &value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use coffee_shop_core::Price;

    use super::*;

    fn sample() -> Vec<LineItem> {
        vec![
            LineItem::new("Latte", Price::new(4.5)).with_image("img/latte.jpg"),
            LineItem {
                quantity: 3,
                ..LineItem::new("Mocha", Price::new(5.0))
            },
        ]
    }

    #[test]
    fn test_memory_round_trip() {
        let storage = MemoryStorage::new();
        save_line_items(&storage, CART_KEY, &sample()).unwrap();
        assert_eq!(load_line_items(&storage, CART_KEY), sample());
    }

    #[test]
    fn test_missing_key_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load_line_items(&storage, ORDERS_KEY).is_empty());
    }

    #[test]
    fn test_malformed_value_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_KEY, "{not json").unwrap();
        assert!(load_line_items(&storage, CART_KEY).is_empty());

        storage.set_item(CART_KEY, r#"{"name":"x"}"#).unwrap();
        assert!(load_line_items(&storage, CART_KEY).is_empty());
    }

    #[test]
    fn test_null_value_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_KEY, "null").unwrap();
        assert!(load_line_items(&storage, CART_KEY).is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let storage = MemoryStorage::new();
        save_line_items(&storage, CART_KEY, &sample()).unwrap();
        assert!(load_line_items(&storage, ORDERS_KEY).is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        save_line_items(&storage, ORDERS_KEY, &sample()).unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(load_line_items(&reopened, ORDERS_KEY), sample());
        assert!(dir.path().join("coffeeShopOrders.json").exists());
    }

    #[test]
    fn test_file_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get_item(CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_corrupt_value_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("coffeeShopCart.json"), "garbage").unwrap();
        assert!(load_line_items(&storage, CART_KEY).is_empty());
    }
}
