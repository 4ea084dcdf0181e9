//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print to
//! stdout and return errors for `main` to report.

pub mod audit;
pub mod backup;
pub mod budget;
pub mod category;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod receipt;
pub mod settings;

pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use dashboard::handle_dashboard_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use receipt::{handle_receipt_command, ReceiptCommands};
pub use settings::{handle_settings_command, SettingsCommands};

use chrono::NaiveDate;

use crate::error::{FiscalError, FiscalResult};
use crate::models::{ExpenseDate, Money, MonthYear};
use crate::storage::{Collection, Record};

/// Parse a user-entered amount ("12.50", "$1,200")
pub(crate) fn parse_amount(input: &str) -> FiscalResult<Money> {
    Money::parse(input).map_err(|e| FiscalError::Validation(e.to_string()))
}

/// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp
pub(crate) fn parse_date(input: &str) -> FiscalResult<ExpenseDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().into());
        }
    }
    ExpenseDate::parse(input)
        .map_err(|_| FiscalError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", input)))
}

/// The given month, or the current one
pub(crate) fn month_or_current(input: Option<&str>) -> FiscalResult<MonthYear> {
    input.map_or_else(|| Ok(MonthYear::current()), str::parse)
}

/// Find a record by full id or by an unambiguous id prefix
pub(crate) fn resolve_record<T: Record>(
    collection: &Collection<T>,
    input: &str,
    entity_type: &'static str,
) -> FiscalResult<T> {
    let input = input.trim();
    let not_found = || FiscalError::NotFound {
        entity_type,
        identifier: input.to_string(),
    };
    if input.is_empty() {
        return Err(not_found());
    }

    let mut matches = collection.filter(|r| r.id().to_string().starts_with(input))?;
    if let Some(exact) = matches.iter().position(|r| r.id().to_string() == input) {
        return Ok(matches.swap_remove(exact));
    }
    match matches.len() {
        0 => Err(not_found()),
        1 => Ok(matches.remove(0)),
        n => Err(FiscalError::Validation(format!(
            "'{}' matches {} {} records; use a longer id",
            input,
            n,
            entity_type.to_lowercase()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, CategoryId};
    use crate::storage::MemoryStore;

    #[test]
    fn test_parse_date_forms() {
        let day = parse_date("2024-05-03").unwrap();
        assert_eq!(day.as_str(), "2024-05-03T00:00:00.000Z");

        let stamped = parse_date("2024-05-03T10:15:00+02:00").unwrap();
        assert_eq!(stamped.as_str(), "2024-05-03T10:15:00+02:00");
        assert_eq!(stamped.to_utc().to_rfc3339(), "2024-05-03T08:15:00+00:00");

        assert!(parse_date("03/05/2024").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,200.5").unwrap(), Money::from_cents(120_050));
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_record_by_prefix() {
        let month = "2024-05".parse().unwrap();
        let mut a = Budget::new(CategoryId::from_raw("cat_a"), Money::from_cents(1), month);
        let mut b = Budget::new(CategoryId::from_raw("cat_b"), Money::from_cents(1), month);
        a.id = "bud_aaa1".into();
        b.id = "bud_aab2".into();

        let budgets: Collection<Budget> =
            Collection::new(Box::new(MemoryStore::with_items("budgets", vec![a, b])));
        budgets.load().unwrap();

        assert_eq!(resolve_record(&budgets, "bud_aaa", "Budget").unwrap().id.as_str(), "bud_aaa1");
        assert!(resolve_record(&budgets, "bud_aa", "Budget").unwrap_err().is_validation());
        assert!(resolve_record(&budgets, "bud_z", "Budget").unwrap_err().is_not_found());
    }
}
