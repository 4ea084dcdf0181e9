//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use super::month_or_current;
use crate::error::{FiscalError, FiscalResult};
use crate::export::{csv, json, yaml};
use crate::models::MonthYear;
use crate::storage::Storage;

/// Full export format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (machine-readable)
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data
    All {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Export expenses to CSV
    Expenses {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only expenses in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export one month's budget progress to CSV
    Budgets {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn open_output(output: Option<&Path>) -> FiscalResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FiscalError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn finish(mut writer: Box<dyn Write>, output: Option<&Path>, what: &str) -> FiscalResult<()> {
    writer
        .flush()
        .map_err(|e| FiscalError::Export(e.to_string()))?;
    if let Some(path) = output {
        // stdout stays clean for piping; the note goes to stderr
        eprintln!("{} exported to: {}", what, path.display());
    }
    Ok(())
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FiscalResult<()> {
    match cmd {
        ExportCommands::All { output, format } => {
            let mut writer = open_output(output.as_deref())?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            finish(writer, output.as_deref(), "Full data")
        }

        ExportCommands::Expenses { output, month } => {
            let month = month.as_deref().map(str::parse::<MonthYear>).transpose()?;
            let mut writer = open_output(output.as_deref())?;
            csv::export_expenses_csv(storage, &mut writer, month)?;
            finish(writer, output.as_deref(), "Expenses")
        }

        ExportCommands::Budgets { output, month } => {
            let month = month_or_current(month.as_deref())?;
            let mut writer = open_output(output.as_deref())?;
            csv::export_budgets_csv(storage, &mut writer, month)?;
            finish(writer, output.as_deref(), "Budgets")
        }
    }
}
