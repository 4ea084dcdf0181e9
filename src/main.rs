use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fiscally_fit::cli::{
    handle_audit_command, handle_backup_command, handle_budget_command, handle_category_command,
    handle_dashboard_command, handle_expense_command, handle_export_command,
    handle_receipt_command, handle_settings_command,
};
use fiscally_fit::config::{paths::FiscalPaths, settings::Settings};
use fiscally_fit::storage::Storage;

/// Environment variable holding the log filter (e.g. `debug`, `fiscally_fit=trace`)
const LOG_ENV: &str = "FISCALLY_LOG";

#[derive(Parser)]
#[command(
    name = "fiscally",
    version,
    about = "Personal budgeting from the terminal",
    long_about = "Fiscally Fit tracks spending by category, sets monthly budget goals \
                  and turns grocery receipts into itemized expenses."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Spending summary for a month
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Category management commands
    #[command(subcommand)]
    Category(fiscally_fit::cli::CategoryCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(fiscally_fit::cli::ExpenseCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(fiscally_fit::cli::BudgetCommands),

    /// Receipt scanning commands
    #[command(subcommand)]
    Receipt(fiscally_fit::cli::ReceiptCommands),

    /// Settings commands
    #[command(subcommand)]
    Settings(fiscally_fit::cli::SettingsCommands),

    /// Export data
    #[command(subcommand)]
    Export(fiscally_fit::cli::ExportCommands),

    /// Backup and restore
    #[command(subcommand)]
    Backup(fiscally_fit::cli::BackupCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include before/after values
        #[arg(short, long)]
        verbose: bool,
    },

    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = FiscalPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Dashboard { month }) => {
            handle_dashboard_command(&storage, &settings, month.as_deref())?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Receipt(cmd)) => {
            handle_receipt_command(&storage, &paths, &settings, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &paths, &mut settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Audit { limit, verbose }) => {
            handle_audit_command(&storage, limit, verbose)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Fiscally Fit at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Default categories:");
            for category in storage.categories.get_all()? {
                println!("  {} {}", category.icon.glyph(), category.name);
            }
            println!();
            println!("Run 'fiscally expense add <amount> --category <name>' to record spending.");
        }
        Some(Commands::Config) => {
            println!("Fiscally Fit Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
        }
        None => {
            println!("Fiscally Fit - personal budgeting from the terminal");
            println!();
            println!("Run 'fiscally --help' for usage information.");
            println!("Run 'fiscally dashboard' for this month's summary.");
        }
    }

    Ok(())
}
