//! Budget CLI commands

use clap::Subcommand;

use super::{month_or_current, parse_amount, resolve_record};
use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::FiscalResult;
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budgets and progress for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a monthly goal for a category
    Set {
        /// Category name or ID
        category: String,
        /// Goal amount (e.g. "300")
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change a budget's amount
    Edit {
        /// Budget ID (or unique prefix)
        budget: String,
        /// New amount
        amount: String,
    },

    /// Delete a budget
    Delete {
        /// Budget ID (or unique prefix)
        budget: String,
    },

    /// List months that have budgets
    Months,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FiscalResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::List { month } => {
            let month = month_or_current(month.as_deref())?;
            let statuses = service.list_for_month(month)?;
            print!("{}", format_budget_list(month, &statuses, symbol));
        }

        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let month = month_or_current(month.as_deref())?;
            let category = CategoryService::new(storage).resolve(&category)?;
            let budget = service.create(category.id.clone(), parse_amount(&amount)?, month)?;
            println!(
                "Budget set: {} for {} in {}",
                budget.amount.format_with_symbol(symbol),
                category.name,
                month.display_name()
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::Edit { budget, amount } => {
            let current = resolve_record(&storage.budgets, &budget, "Budget")?;
            let updated = service.set_amount(&current.id, parse_amount(&amount)?)?;
            let progress = service.progress(&updated)?;
            println!(
                "Budget for {} is now {} ({} spent)",
                updated.month_year.display_name(),
                updated.amount.format_with_symbol(symbol),
                progress.spent.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Delete { budget } => {
            let target = resolve_record(&storage.budgets, &budget, "Budget")?;
            if let Some(removed) = service.delete(&target.id)? {
                println!(
                    "Deleted budget {} for {}",
                    removed.id.short(),
                    removed.month_year.display_name()
                );
            }
        }

        BudgetCommands::Months => {
            let months = service.months()?;
            if months.is_empty() {
                println!("No budgets set yet.");
            }
            for month in months {
                println!("{}  {}", month, month.display_name());
            }
        }
    }

    Ok(())
}
