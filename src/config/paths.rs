//! Path management for Fiscally Fit
//!
//! ## Path Resolution Order
//!
//! 1. `FISCALLY_FIT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/fiscally-fit` or `~/.config/fiscally-fit`
//! 3. Windows: `%APPDATA%\fiscally-fit`

use std::path::PathBuf;

use crate::error::FiscalError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FISCALLY_FIT_DATA_DIR";

/// Manages all paths used by Fiscally Fit
#[derive(Debug, Clone)]
pub struct FiscalPaths {
    base_dir: PathBuf,
}

impl FiscalPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FiscalError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FiscalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the three collection files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Path of the file backing a storage key (e.g. `categories` -> `data/categories.json`)
    pub fn collection_file(&self, key: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", key))
    }

    /// Scanned receipt items waiting for review
    pub fn receipt_draft_file(&self) -> PathBuf {
        self.base_dir.join("receipt-draft.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), FiscalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FiscalError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FiscalError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| FiscalError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if Fiscally Fit has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FiscalError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                FiscalError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("fiscally-fit"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FiscalError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FiscalError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("fiscally-fit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FiscalPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_collection_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FiscalPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.collection_file("budgets"),
            temp_dir.path().join("data").join("budgets.json")
        );
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FiscalPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.is_initialized());
    }
}
