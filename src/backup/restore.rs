//! Restoring collections from a backup archive

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::paths::FiscalPaths;
use crate::error::{FiscalError, FiscalResult};
use crate::storage::file_io::remove_if_exists;
use crate::storage::{write_json_atomic, BUDGETS_KEY, CATEGORIES_KEY, EXPENSES_KEY};

use super::manager::{BackupArchive, ARCHIVE_SCHEMA_VERSION};

/// Writes an archive back over the collection files
pub struct RestoreManager {
    paths: FiscalPaths,
}

/// What a restore wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    pub backup_date: DateTime<Utc>,
    pub categories: Option<usize>,
    pub expenses: Option<usize>,
    pub budgets: Option<usize>,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        let describe = |label: &str, count: Option<usize>| match count {
            Some(n) => format!("{} {}", n, label),
            None => format!("{} (not stored)", label),
        };
        format!(
            "Restored {}, {}, {} from backup of {}",
            describe("categories", self.categories),
            describe("expenses", self.expenses),
            describe("budgets", self.budgets),
            self.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

impl RestoreManager {
    pub fn new(paths: FiscalPaths) -> Self {
        Self { paths }
    }

    /// Read and check an archive without touching current data
    pub fn read_archive(&self, backup_path: &Path) -> FiscalResult<BackupArchive> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| FiscalError::Io(format!("Failed to read backup file: {}", e)))?;
        let archive: BackupArchive = serde_json::from_str(&contents)
            .map_err(|e| FiscalError::Json(format!("Failed to parse backup file: {}", e)))?;

        if archive.schema_version > ARCHIVE_SCHEMA_VERSION {
            return Err(FiscalError::Storage(format!(
                "Backup schema version {} is newer than supported version {}",
                archive.schema_version, ARCHIVE_SCHEMA_VERSION
            )));
        }
        Ok(archive)
    }

    /// Overwrite current data with the backup's contents
    ///
    /// Collections absent from the archive are removed, so the next load
    /// behaves as it did when the backup was taken.
    pub fn restore_from_file(&self, backup_path: &Path) -> FiscalResult<RestoreResult> {
        let archive = self.read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    pub fn restore_from_archive(&self, archive: &BackupArchive) -> FiscalResult<RestoreResult> {
        self.paths.ensure_directories()?;

        let result = RestoreResult {
            backup_date: archive.created_at,
            categories: self.restore_collection(CATEGORIES_KEY, archive.categories.as_deref())?,
            expenses: self.restore_collection(EXPENSES_KEY, archive.expenses.as_deref())?,
            budgets: self.restore_collection(BUDGETS_KEY, archive.budgets.as_deref())?,
        };
        tracing::info!(date = %archive.created_at, "restored backup");
        Ok(result)
    }

    fn restore_collection<T: serde::Serialize>(
        &self,
        key: &str,
        records: Option<&[T]>,
    ) -> FiscalResult<Option<usize>> {
        let path = self.paths.collection_file(key);
        match records {
            Some(records) => {
                write_json_atomic(&path, records)?;
                Ok(Some(records.len()))
            }
            None => {
                remove_if_exists(&path)?;
                Ok(None)
            }
        }
    }
}
