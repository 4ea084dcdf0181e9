//! Backup CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::FiscalPaths;
use crate::config::settings::Settings;
use crate::error::{FiscalError, FiscalResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup and prune old ones
    Create,

    /// List all available backups
    List,

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &FiscalPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> FiscalResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: fiscally backup create");
                return Ok(());
            }

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                println!(
                    "  {}. {} ({} ago, {}){}",
                    i + 1,
                    backup.filename,
                    format_duration(age),
                    format_size(backup.size_bytes),
                    if backup.is_monthly { " [monthly]" } else { "" }
                );
            }
            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let restore = RestoreManager::new(paths.clone());
            let archive = restore.read_archive(&backup_path)?;

            println!("Backup: {}", backup_path.display());
            println!("Created: {}", archive.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("Records: {}", archive.record_count());
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force:");
                println!("  fiscally backup restore {} --force", backup);
                return Ok(());
            }

            let safety = manager.create_backup()?;
            println!("Current data backed up to: {}", safety.display());

            let result = restore.restore_from_archive(&archive)?;
            println!("{}", result.summary());
        }
    }

    Ok(())
}

/// Resolve `latest`, a path, or a file name in the backup directory
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> FiscalResult<PathBuf> {
    let not_found = || FiscalError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    };

    if backup.eq_ignore_ascii_case("latest") {
        return manager.get_latest_backup()?.map(|b| b.path).ok_or_else(not_found);
    }

    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    let listed = match manager.get_backup(backup)? {
        Some(info) => Some(info),
        None => manager.get_backup(&format!("{}.json", backup))?,
    };
    listed.map(|b| b.path).ok_or_else(not_found)
}

fn format_duration(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s if s < 30 * 86_400 => format!("{}d", s / 86_400),
        s => format!("{}mo", s / (30 * 86_400)),
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
