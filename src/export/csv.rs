//! CSV export of expenses and budget progress

use std::collections::HashMap;
use std::io::Write;

use crate::error::{FiscalError, FiscalResult};
use crate::models::{CategoryId, MonthYear};
use crate::services::BudgetService;
use crate::storage::Storage;

fn export_error(e: impl std::fmt::Display) -> FiscalError {
    FiscalError::Export(e.to_string())
}

fn category_names(storage: &Storage) -> FiscalResult<HashMap<CategoryId, String>> {
    Ok(storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

/// Expenses (newest first), optionally limited to one month
///
/// Itemized expenses list their items in one cell as `name price; ...`.
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    writer: W,
    month: Option<MonthYear>,
) -> FiscalResult<()> {
    let names = category_names(storage)?;
    let mut expenses = match month {
        Some(month) => storage.expenses.get_by_month(month)?,
        None => storage.expenses.get_all()?,
    };
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Category", "Amount", "Notes", "Items"])
        .map_err(export_error)?;

    for expense in &expenses {
        let category = names
            .get(&expense.category_id)
            .map_or("Unknown", String::as_str);
        let items = expense
            .items
            .iter()
            .flatten()
            .map(|i| format!("{} {:.2}", i.name, i.price.as_decimal()))
            .collect::<Vec<_>>()
            .join("; ");

        csv.write_record([
            expense.id.as_str(),
            expense.date_string(),
            category,
            &format!("{:.2}", expense.amount.as_decimal()),
            expense.notes.as_deref().unwrap_or(""),
            &items,
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    tracing::debug!(rows = expenses.len(), "exported expenses csv");
    Ok(())
}

/// Budget progress for one month, sorted by category name
pub fn export_budgets_csv<W: Write>(storage: &Storage, writer: W, month: MonthYear) -> FiscalResult<()> {
    let statuses = BudgetService::new(storage).list_for_month(month)?;

    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["Month", "Category", "Budgeted", "Spent", "Remaining", "Utilization %"])
        .map_err(export_error)?;

    for status in &statuses {
        let progress = status.progress;
        let utilization = progress.utilization_percent();
        let utilization = if utilization.is_finite() {
            format!("{:.1}", utilization)
        } else {
            "inf".to_string()
        };
        csv.write_record([
            month.to_string(),
            status.category_name().to_string(),
            format!("{:.2}", progress.budgeted.as_decimal()),
            format!("{:.2}", progress.spent.as_decimal()),
            format!("{:.2}", progress.remaining().as_decimal()),
            utilization,
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)
}
