//! Backups of the three stored collections
//!
//! - `BackupManager`: writes dated archives and enforces retention
//! - `RestoreManager`: checks an archive and writes it back over current data
//!
//! Archives are JSON files named `backup-YYYYMMDD-HHMMSS-mmm.json` in the
//! backup directory. By default 30 daily and 12 monthly backups are kept; the
//! oldest backup of each calendar month counts as that month's monthly backup.

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult};
