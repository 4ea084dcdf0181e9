//! Backup creation, listing and retention

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::FiscalPaths;
use crate::config::settings::BackupRetention;
use crate::error::{FiscalError, FiscalResult};
use crate::models::{Budget, Category, Expense};
use crate::storage::{read_json_optional, write_json_atomic, BUDGETS_KEY, CATEGORIES_KEY, EXPENSES_KEY};

pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

/// A backup file on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Oldest backup of its calendar month
    pub is_monthly: bool,
}

/// Contents of a backup file
///
/// A collection that had never been written is `None`, so restoring brings
/// back exactly the stored state (including "defaults not yet seeded").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub categories: Option<Vec<Category>>,
    pub expenses: Option<Vec<Expense>>,
    pub budgets: Option<Vec<Budget>>,
}

impl BackupArchive {
    /// Snapshot the collection files under `paths`
    pub fn capture(paths: &FiscalPaths, created_at: DateTime<Utc>) -> FiscalResult<Self> {
        Ok(Self {
            schema_version: ARCHIVE_SCHEMA_VERSION,
            created_at,
            categories: read_json_optional(paths.collection_file(CATEGORIES_KEY))?,
            expenses: read_json_optional(paths.collection_file(EXPENSES_KEY))?,
            budgets: read_json_optional(paths.collection_file(BUDGETS_KEY))?,
        })
    }

    pub fn record_count(&self) -> usize {
        self.categories.as_ref().map_or(0, Vec::len)
            + self.expenses.as_ref().map_or(0, Vec::len)
            + self.budgets.as_ref().map_or(0, Vec::len)
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    paths: FiscalPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: FiscalPaths, retention: BackupRetention) -> Self {
        Self { paths, retention }
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.paths.backup_dir()
    }

    /// Write a new archive of the current data and return its path
    pub fn create_backup(&self) -> FiscalResult<PathBuf> {
        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let path = self.backup_dir().join(filename);

        let archive = BackupArchive::capture(&self.paths, now)?;
        write_json_atomic(&path, &archive)?;
        tracing::info!(path = %path.display(), records = archive.record_count(), "backup created");

        Ok(path)
    }

    /// Create a backup and then prune old ones
    pub fn create_backup_with_retention(&self) -> FiscalResult<(PathBuf, Vec<PathBuf>)> {
        let path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((path, deleted))
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> FiscalResult<Vec<BackupInfo>> {
        let dir = self.backup_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&dir)
            .map_err(|e| FiscalError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry =
                entry.map_err(|e| FiscalError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mark_monthly(&mut backups);
        Ok(backups)
    }

    /// Look a backup up by file name
    pub fn get_backup(&self, filename: &str) -> FiscalResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    pub fn get_latest_backup(&self) -> FiscalResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Delete backups beyond the retention counts; returns what was removed
    pub fn enforce_retention(&self) -> FiscalResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path)
                .map_err(|e| FiscalError::Io(format!("Failed to delete old backup: {}", e)))?;
            tracing::debug!(file = %backup.filename, "pruned backup");
            deleted.push(backup.path);
        }
        Ok(deleted)
    }
}

/// Flag the oldest backup of each month; `backups` is sorted newest first
fn mark_monthly(backups: &mut [BackupInfo]) {
    let mut seen = HashSet::new();
    for backup in backups.iter_mut().rev() {
        let month = (backup.created_at.year(), backup.created_at.month());
        backup.is_monthly = seen.insert(month);
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// `YYYYMMDD-HHMMSS-mmm`; the millisecond part is optional
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let (seconds, millis) = match stamp.len() {
        15 => (stamp, 0),
        19 => (stamp.get(..15)?, stamp.get(16..)?.parse().ok()?),
        _ => return None,
    };
    let naive = NaiveDateTime::parse_from_str(seconds, "%Y%m%d-%H%M%S").ok()?;
    let naive = naive.checked_add_signed(chrono::Duration::milliseconds(millis))?;
    Some(naive.and_utc())
}
