//! Cached, order-preserving repository over a [`CollectionStore`]
//!
//! `upsert` and `delete` touch the in-memory cache only and `save()` writes
//! the whole collection back. The `*_and_save` variants write first and only
//! update the cache once the store accepted the new collection.

use std::fmt::Display;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{FiscalError, FiscalResult};

use super::store::CollectionStore;

/// A stored record with a stable identity
pub trait Record: Clone {
    type Id: PartialEq + Clone + Display;

    fn id(&self) -> &Self::Id;
}

impl Record for crate::models::Category {
    type Id = crate::models::CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for crate::models::Expense {
    type Id = crate::models::ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for crate::models::Budget {
    type Id = crate::models::BudgetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Repository for one collection
pub struct Collection<T: Record> {
    store: Box<dyn CollectionStore<T>>,
    items: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(store: Box<dyn CollectionStore<T>>) -> Self {
        Self {
            store,
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &str {
        self.store.key()
    }

    fn read(&self) -> FiscalResult<RwLockReadGuard<'_, Vec<T>>> {
        self.items
            .read()
            .map_err(|e| FiscalError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FiscalResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.items
            .write()
            .map_err(|e| FiscalError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Refresh the cache from storage
    ///
    /// Returns `false` when the entry was absent; the cache is then empty.
    pub fn load(&self) -> FiscalResult<bool> {
        let stored = self.store.load()?;
        let present = stored.is_some();
        let records = stored.unwrap_or_default();
        tracing::debug!(key = self.key(), count = records.len(), present, "loaded collection");
        *self.write()? = records;
        Ok(present)
    }

    /// Write the whole cached collection back
    pub fn save(&self) -> FiscalResult<()> {
        let items = self.read()?;
        tracing::debug!(key = self.key(), count = items.len(), "saving collection");
        self.store.save_all(&items)
    }

    /// Drop the stored entry and empty the cache
    pub fn remove_entry(&self) -> FiscalResult<()> {
        self.store.remove()?;
        self.write()?.clear();
        Ok(())
    }

    /// Replace every cached record (used by restore)
    pub fn replace_all(&self, records: Vec<T>) -> FiscalResult<()> {
        *self.write()? = records;
        Ok(())
    }

    /// All records in stored order
    pub fn get_all(&self) -> FiscalResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: &T::Id) -> FiscalResult<Option<T>> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    pub fn find<P>(&self, predicate: P) -> FiscalResult<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.read()?.iter().find(|r| predicate(r)).cloned())
    }

    pub fn filter<P>(&self, predicate: P) -> FiscalResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.read()?.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// Insert a record, or replace the one with the same id in place
    ///
    /// Returns the previous version when one was replaced.
    pub fn upsert(&self, record: T) -> FiscalResult<Option<T>> {
        Ok(upsert_into(&mut *self.write()?, record))
    }

    /// Remove a record by id; a missing id is a no-op returning `None`
    pub fn delete(&self, id: &T::Id) -> FiscalResult<Option<T>> {
        Ok(remove_from(&mut *self.write()?, id))
    }

    /// `upsert` followed by a write of the whole collection
    pub fn upsert_and_save(&self, record: T) -> FiscalResult<Option<T>> {
        self.commit(|items| upsert_into(items, record))
    }

    /// `delete` followed by a write of the whole collection
    pub fn delete_and_save(&self, id: &T::Id) -> FiscalResult<Option<T>> {
        self.commit(|items| remove_from(items, id))
    }

    /// Apply `change` to a copy of the records, store the copy, then swap it in
    fn commit<R>(&self, change: impl FnOnce(&mut Vec<T>) -> R) -> FiscalResult<R> {
        let mut items = self.write()?;
        let mut next = items.clone();
        let result = change(&mut next);
        self.store.save_all(&next)?;
        *items = next;
        Ok(result)
    }

    pub fn count(&self) -> FiscalResult<usize> {
        Ok(self.read()?.len())
    }
}

fn upsert_into<T: Record>(items: &mut Vec<T>, record: T) -> Option<T> {
    match items.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => Some(std::mem::replace(slot, record)),
        None => {
            items.push(record);
            None
        }
    }
}

fn remove_from<T: Record>(items: &mut Vec<T>, id: &T::Id) -> Option<T> {
    items
        .iter()
        .position(|r| r.id() == id)
        .map(|index| items.remove(index))
}
