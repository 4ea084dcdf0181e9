//! Settings CLI commands

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::paths::FiscalPaths;
use crate::config::settings::{Settings, Theme};
use crate::error::{FiscalError, FiscalResult};
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Set the display theme
    Theme {
        /// light, dark or system
        theme: String,
    },

    /// Set the currency symbol used for amounts
    Currency {
        /// Symbol, e.g. "$" or "€"
        symbol: String,
    },

    /// Configure receipt extraction
    Extraction {
        /// API base URL
        #[arg(long)]
        endpoint: Option<String>,
        /// Model name
        #[arg(long)]
        model: Option<String>,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete all categories, expenses and budgets (a backup is taken first)
    #[command(name = "clear-data")]
    ClearData {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    paths: &FiscalPaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> FiscalResult<()> {
    match cmd {
        SettingsCommands::Show => {
            println!("Settings");
            println!("========");
            println!("Theme:            {}", settings.theme);
            println!("Currency symbol:  {}", settings.currency_symbol);
            println!(
                "Backup retention: {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
            println!();
            println!("Receipt extraction:");
            println!("  Endpoint:    {}", settings.extraction.endpoint);
            println!("  Model:       {}", settings.extraction.model);
            println!(
                "  API key:     ${} ({})",
                settings.extraction.api_key_env,
                if settings.extraction.api_key().is_ok() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!("  Timeout:     {}s", settings.extraction.timeout_secs);
        }

        SettingsCommands::Theme { theme } => {
            settings.theme = theme.parse::<Theme>()?;
            settings.save(paths)?;
            println!("Theme set to {}", settings.theme);
        }

        SettingsCommands::Currency { symbol } => {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(FiscalError::Validation("Currency symbol cannot be empty".into()));
            }
            settings.currency_symbol = symbol.to_string();
            settings.save(paths)?;
            println!("Currency symbol set to {}", settings.currency_symbol);
        }

        SettingsCommands::Extraction {
            endpoint,
            model,
            api_key_env,
            timeout,
        } => {
            let extraction = &mut settings.extraction;
            if let Some(endpoint) = endpoint {
                extraction.endpoint = endpoint;
            }
            if let Some(model) = model {
                extraction.model = model;
            }
            if let Some(api_key_env) = api_key_env {
                extraction.api_key_env = api_key_env;
            }
            if let Some(timeout) = timeout {
                if timeout == 0 {
                    return Err(FiscalError::Validation("Timeout must be at least 1 second".into()));
                }
                extraction.timeout_secs = timeout;
            }
            settings.save(paths)?;
            println!("Extraction settings saved.");
        }

        SettingsCommands::ClearData { yes } => {
            if !yes {
                println!("WARNING: This deletes every category, expense and budget.");
                println!("Default categories are recreated afterwards.");
                println!("To proceed, run again with --yes:");
                println!("  fiscally settings clear-data --yes");
                return Ok(());
            }

            let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());
            let backup = manager.create_backup()?;
            println!("Backup saved: {}", backup.display());

            storage.clear_all()?;
            println!("All data cleared. Default categories restored.");
        }
    }

    Ok(())
}
