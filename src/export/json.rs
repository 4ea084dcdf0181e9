//! Full JSON export

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FiscalError, FiscalResult};
use crate::models::{Budget, Category, Expense, ExpenseDate};
use crate::storage::Storage;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every stored collection plus a few counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub expense_count: usize,
    pub budget_count: usize,
    /// Date of the oldest expense (`YYYY-MM-DD`)
    pub earliest_expense: Option<String>,
    /// Date of the newest expense (`YYYY-MM-DD`)
    pub latest_expense: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> FiscalResult<Self> {
        let categories = storage.categories.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let day = |d: &ExpenseDate| d.format("%Y-%m-%d").to_string();
        let metadata = ExportMetadata {
            category_count: categories.len(),
            expense_count: expenses.len(),
            budget_count: budgets.len(),
            earliest_expense: expenses.iter().map(|e| &e.date).min().map(day),
            latest_expense: expenses.iter().map(|e| &e.date).max().map(day),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            expenses,
            budgets,
            metadata,
        })
    }
}

/// Write the full export as pretty JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> FiscalResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FiscalError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FiscalError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money};
    use crate::services::{ExpenseDraft, ExpenseService};
    use chrono::TimeZone;

    #[test]
    fn test_export_contains_collections_and_metadata() {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        let service = ExpenseService::new(&storage);
        for day in [3, 17] {
            service
                .create(ExpenseDraft::new(
                    CategoryId::from_raw("cat_health"),
                    Money::from_cents(4_200),
                    Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
                ))
                .unwrap();
        }

        let mut out = Vec::new();
        export_full_json(&storage, &mut out).unwrap();
        let parsed: FullExport = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.categories.len(), 8);
        assert_eq!(parsed.metadata.expense_count, 2);
        assert_eq!(parsed.metadata.earliest_expense.as_deref(), Some("2024-05-03"));
        assert_eq!(parsed.metadata.latest_expense.as_deref(), Some("2024-05-17"));

        // Records keep their storage shape
        let raw: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(raw["expenses"][0]["categoryId"], "cat_health");
        assert_eq!(raw["expenses"][0]["amount"], 42.0);
    }
}
