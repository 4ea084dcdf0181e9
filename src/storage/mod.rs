//! Storage layer for Fiscally Fit
//!
//! Three collections (`categories`, `expenses`, `budgets`), each stored as one
//! JSON array and cached in memory. Every mutation is followed by a full
//! write-back of the affected collection.

pub mod budget;
pub mod categories;
pub mod collection;
pub mod expenses;
pub mod file_io;
pub mod store;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use collection::{Collection, Record};
pub use expenses::ExpenseRepository;
pub use file_io::{read_json_optional, write_json_atomic};
pub use store::{CollectionStore, JsonFileStore, MemoryStore};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FiscalPaths;
use crate::error::FiscalResult;

pub const CATEGORIES_KEY: &str = "categories";
pub const EXPENSES_KEY: &str = "expenses";
pub const BUDGETS_KEY: &str = "budgets";

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: Option<FiscalPaths>,
    audit: Option<AuditLogger>,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// File-backed storage rooted at `paths`
    pub fn new(paths: FiscalPaths) -> FiscalResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: Collection::new(Box::new(JsonFileStore::new(
                CATEGORIES_KEY,
                paths.collection_file(CATEGORIES_KEY),
            ))),
            expenses: Collection::new(Box::new(JsonFileStore::new(
                EXPENSES_KEY,
                paths.collection_file(EXPENSES_KEY),
            ))),
            budgets: Collection::new(Box::new(JsonFileStore::new(
                BUDGETS_KEY,
                paths.collection_file(BUDGETS_KEY),
            ))),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths: Some(paths),
        })
    }

    /// Storage held entirely in memory, without an audit log
    pub fn in_memory() -> Self {
        Self {
            paths: None,
            audit: None,
            categories: Collection::new(Box::new(MemoryStore::new(CATEGORIES_KEY))),
            expenses: Collection::new(Box::new(MemoryStore::new(EXPENSES_KEY))),
            budgets: Collection::new(Box::new(MemoryStore::new(BUDGETS_KEY))),
        }
    }

    /// On-disk locations; `None` for in-memory storage
    pub fn paths(&self) -> Option<&FiscalPaths> {
        self.paths.as_ref()
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load every collection, seeding default categories if needed
    pub fn load_all(&self) -> FiscalResult<()> {
        self.categories.load_or_seed()?;
        self.expenses.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Write every collection back
    pub fn save_all(&self) -> FiscalResult<()> {
        self.categories.save()?;
        self.expenses.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Remove all three entries and reload, which re-seeds the default categories
    pub fn clear_all(&self) -> FiscalResult<()> {
        let entries = vec![
            AuditEntry::clear(EntityType::Category, &self.categories.get_all()?),
            AuditEntry::clear(EntityType::Expense, &self.expenses.get_all()?),
            AuditEntry::clear(EntityType::Budget, &self.budgets.get_all()?),
        ];

        self.categories.remove_entry()?;
        self.expenses.remove_entry()?;
        self.budgets.remove_entry()?;
        tracing::info!("cleared all stored data");

        self.write_audit(&entries);
        self.load_all()
    }

    /// Whether a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.paths.as_ref().is_some_and(FiscalPaths::is_initialized)
    }

    // Audit hooks. A failing audit write is reported but never undoes a
    // committed data write.

    fn write_audit(&self, entries: &[AuditEntry]) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_batch(entries) {
                tracing::warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(&[AuditEntry::create(entity_type, entity_id, entity_name, entity)]);
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        self.write_audit(&[AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        )]);
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(&[AuditEntry::delete(entity_type, entity_id, entity_name, entity)]);
    }
}
