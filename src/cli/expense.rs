//! Expense CLI commands

use chrono::Utc;
use clap::Subcommand;

use super::{month_or_current, parse_amount, parse_date, resolve_record};
use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{FiscalError, FiscalResult};
use crate::models::FormMode;
use crate::services::{CategoryService, ExpenseDraft, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses, newest first
    List {
        /// Only expenses in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Show every month
        #[arg(long, conflicts_with = "month")]
        all: bool,
    },

    /// Record an expense
    Add {
        /// Amount (e.g. "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Grocery item as NAME=PRICE (repeatable, grocery category only)
        #[arg(short, long = "item", value_name = "NAME=PRICE")]
        items: Vec<String>,
    },

    /// Show one expense with its items
    Show {
        /// Expense ID (or unique prefix)
        expense: String,
    },

    /// Change an expense
    Edit {
        /// Expense ID (or unique prefix)
        expense: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes (empty to clear)
        #[arg(short, long)]
        notes: Option<String>,
        /// Add a grocery item as NAME=PRICE (repeatable)
        #[arg(short, long = "item", value_name = "NAME=PRICE")]
        items: Vec<String>,
        /// Drop the existing items first
        #[arg(long)]
        clear_items: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (or unique prefix)
        expense: String,
    },
}

/// Split `NAME=PRICE` at the last `=`
fn parse_item(raw: &str) -> FiscalResult<(String, crate::models::Money)> {
    let (name, price) = raw.rsplit_once('=').ok_or_else(|| {
        FiscalError::Validation(format!("Invalid item '{}' (expected NAME=PRICE)", raw))
    })?;
    Ok((name.trim().to_string(), parse_amount(price)?))
}

fn add_items(draft: &mut ExpenseDraft, items: &[String]) -> FiscalResult<()> {
    for raw in items {
        let (name, price) = parse_item(raw)?;
        draft.add_item(&name, price)?;
    }
    Ok(())
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FiscalResult<()> {
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List { month, all } => {
            let expenses = if all {
                service.list()?
            } else {
                let month = month_or_current(month.as_deref())?;
                println!("Expenses for {}\n", month.display_name());
                service.list_for_month(month)?
            };
            print!("{}", format_expense_list(&expenses, &categories.list()?, symbol));
        }

        ExpenseCommands::Add {
            amount,
            category,
            date,
            notes,
            items,
        } => {
            let category = categories.resolve(&category)?;
            let date = date
                .as_deref()
                .map(parse_date)
                .transpose()?
                .unwrap_or_else(|| Utc::now().into());

            let mut draft = ExpenseDraft::new(category.id.clone(), parse_amount(&amount)?, date);
            draft.notes = notes;
            add_items(&mut draft, &items)?;
            if !draft.items.is_empty() && !category.is_grocery() {
                tracing::warn!(category = %category.name, "items are only kept for grocery expenses");
            }

            let expense = service.create(draft)?;
            println!(
                "Recorded {} in {} on {}",
                expense.amount.format_with_symbol(symbol),
                category.name,
                expense.date.format("%Y-%m-%d")
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Show { expense } => {
            let expense = resolve_record(&storage.expenses, &expense, "Expense")?;
            let category = categories.get(&expense.category_id)?;
            print!("{}", format_expense_details(&expense, category.as_ref(), symbol));
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            category,
            date,
            notes,
            items,
            clear_items,
        } => {
            let current = resolve_record(&storage.expenses, &expense, "Expense")?;
            let mut draft = ExpenseDraft::from_expense(&current);

            if let Some(amount) = amount {
                draft.amount = Some(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                draft.category_id = Some(categories.resolve(&category)?.id);
            }
            if let Some(date) = date {
                draft.date = Some(parse_date(&date)?);
            }
            if notes.is_some() {
                draft.notes = notes;
            }
            if clear_items {
                draft.items.clear();
            }
            add_items(&mut draft, &items)?;

            let updated = service.submit(FormMode::Editing(current.id.clone()), draft)?;
            println!(
                "Updated expense {}: {} on {}",
                updated.id.short(),
                updated.amount.format_with_symbol(symbol),
                updated.date.format("%Y-%m-%d")
            );
        }

        ExpenseCommands::Delete { expense } => {
            let target = resolve_record(&storage.expenses, &expense, "Expense")?;
            if let Some(removed) = service.delete(&target.id)? {
                println!(
                    "Deleted expense {} ({})",
                    removed.id.short(),
                    removed.amount.format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
