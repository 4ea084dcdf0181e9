//! Persistence backends for whole collections
//!
//! A collection is always read and written as one array under a fixed key.
//! [`JsonFileStore`] keeps each key in its own JSON file; [`MemoryStore`] keeps
//! it in process and is what tests run against.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FiscalError, FiscalResult};

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

/// Load/save access to one stored collection
pub trait CollectionStore<T>: Send + Sync {
    /// The storage key (`categories`, `expenses`, `budgets`)
    fn key(&self) -> &str;

    /// Read the collection; `None` when the entry has never been written
    fn load(&self) -> FiscalResult<Option<Vec<T>>>;

    /// Replace the stored collection with `items`
    fn save_all(&self, items: &[T]) -> FiscalResult<()>;

    /// Remove the entry entirely
    fn remove(&self) -> FiscalResult<()>;
}

/// A collection persisted as a pretty-printed JSON array on disk
pub struct JsonFileStore<T> {
    key: String,
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(key: impl Into<String>, path: PathBuf) -> Self {
        Self {
            key: key.into(),
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> FiscalResult<Option<Vec<T>>> {
        read_json_optional(&self.path)
    }

    fn save_all(&self, items: &[T]) -> FiscalResult<()> {
        write_json_atomic(&self.path, items)
    }

    fn remove(&self) -> FiscalResult<()> {
        remove_if_exists(&self.path).map(|_| ())
    }
}

/// In-process store with the same semantics as the file store
pub struct MemoryStore<T> {
    key: String,
    entry: RwLock<Option<Vec<T>>>,
}

impl<T> MemoryStore<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entry: RwLock::new(None),
        }
    }

    /// Start with an existing entry
    pub fn with_items(key: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            key: key.into(),
            entry: RwLock::new(Some(items)),
        }
    }
}

impl<T> CollectionStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> FiscalResult<Option<Vec<T>>> {
        let entry = self
            .entry
            .read()
            .map_err(|e| FiscalError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entry.clone())
    }

    fn save_all(&self, items: &[T]) -> FiscalResult<()> {
        let mut entry = self
            .entry
            .write()
            .map_err(|e| FiscalError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *entry = Some(items.to_vec());
        Ok(())
    }

    fn remove(&self) -> FiscalResult<()> {
        let mut entry = self
            .entry
            .write()
            .map_err(|e| FiscalError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *entry = None;
        Ok(())
    }
}
