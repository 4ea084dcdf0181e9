//! Monthly spending summary

use std::collections::HashMap;

use crate::error::FiscalResult;
use crate::models::{BudgetProgress, Category, CategoryId, Money, MonthYear};
use crate::storage::Storage;

/// Spending in one category for the month
#[derive(Debug, Clone)]
pub struct CategorySpending {
    pub category_id: CategoryId,
    pub category: Option<Category>,
    pub spent: Money,
    pub budgeted: Option<Money>,
}

impl CategorySpending {
    pub fn name(&self) -> &str {
        self.category.as_ref().map_or("Unknown", |c| c.name.as_str())
    }

    pub fn progress(&self) -> Option<BudgetProgress> {
        self.budgeted.map(|b| BudgetProgress::new(b, self.spent))
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub month: MonthYear,
    pub total_spent: Money,
    pub expense_count: usize,
    pub total_budgeted: Money,
    /// Spend in categories that have a budget this month
    pub budgeted_spent: Money,
    /// Categories with spend or a budget, highest spend first
    pub categories: Vec<CategorySpending>,
}

impl DashboardSummary {
    /// Spend across budgeted categories against their combined ceilings
    pub fn overall_progress(&self) -> Option<BudgetProgress> {
        (!self.total_budgeted.is_zero())
            .then(|| BudgetProgress::new(self.total_budgeted, self.budgeted_spent))
    }

    pub fn top_category(&self) -> Option<&CategorySpending> {
        self.categories.first().filter(|c| c.spent.is_positive())
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &CategorySpending> {
        self.categories
            .iter()
            .filter(|c| c.progress().is_some_and(|p| p.is_over_budget()))
    }
}

pub struct DashboardService<'a> {
    storage: &'a Storage,
}

impl<'a> DashboardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn summary(&self, month: MonthYear) -> FiscalResult<DashboardSummary> {
        let expenses = self.storage.expenses.get_by_month(month)?;
        let budgets = self.storage.budgets.get_for_month(month)?;

        let mut spent_by_category: HashMap<CategoryId, Money> = HashMap::new();
        for expense in &expenses {
            *spent_by_category.entry(expense.category_id.clone()).or_default() += expense.amount;
        }

        let mut rows: Vec<CategorySpending> = Vec::new();
        for budget in &budgets {
            rows.push(CategorySpending {
                category_id: budget.category_id.clone(),
                category: None,
                spent: spent_by_category.remove(&budget.category_id).unwrap_or_default(),
                budgeted: Some(budget.amount),
            });
        }
        for (category_id, spent) in spent_by_category {
            rows.push(CategorySpending {
                category_id,
                category: None,
                spent,
                budgeted: None,
            });
        }
        for row in &mut rows {
            row.category = self.storage.categories.get(&row.category_id)?;
        }
        rows.sort_by(|a, b| b.spent.cmp(&a.spent).then_with(|| a.name().cmp(b.name())));

        let summary = DashboardSummary {
            month,
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            expense_count: expenses.len(),
            total_budgeted: budgets.iter().map(|b| b.amount).sum(),
            budgeted_spent: rows
                .iter()
                .filter(|r| r.budgeted.is_some())
                .map(|r| r.spent)
                .sum(),
            categories: rows,
        };
        tracing::debug!(
            month = %month,
            total = %summary.total_spent,
            categories = summary.categories.len(),
            "dashboard summary"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::budget::BudgetService;
    use crate::services::expense::{ExpenseDraft, ExpenseService};
    use chrono::{TimeZone, Utc};

    fn cat(id: &str) -> CategoryId {
        CategoryId::from_raw(id)
    }

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();

        let may: MonthYear = "2024-05".parse().unwrap();
        let budgets = BudgetService::new(&storage);
        budgets.create(cat("cat_grocery"), Money::from_cents(30_000), may).unwrap();
        budgets.create(cat("cat_transport"), Money::from_cents(10_000), may).unwrap();

        let expenses = ExpenseService::new(&storage);
        for (category, cents, month) in [
            ("cat_grocery", 12_000, 5),
            ("cat_grocery", 8_000, 5),
            ("cat_entertainment", 25_000, 5),
            ("cat_transport", 11_000, 5),
            ("cat_grocery", 50_000, 4),
        ] {
            expenses
                .create(ExpenseDraft::new(
                    cat(category),
                    Money::from_cents(cents),
                    Utc.with_ymd_and_hms(2024, month, 15, 12, 0, 0).unwrap(),
                ))
                .unwrap();
        }
        storage
    }

    #[test]
    fn test_summary_totals() {
        let storage = seeded();
        let summary = DashboardService::new(&storage)
            .summary("2024-05".parse().unwrap())
            .unwrap();

        assert_eq!(summary.total_spent, Money::from_cents(56_000));
        assert_eq!(summary.expense_count, 4);
        assert_eq!(summary.total_budgeted, Money::from_cents(40_000));
        assert_eq!(summary.budgeted_spent, Money::from_cents(31_000));

        let overall = summary.overall_progress().unwrap();
        assert_eq!(overall.utilization_percent(), 77.5);
    }

    #[test]
    fn test_top_and_over_budget() {
        let storage = seeded();
        let summary = DashboardService::new(&storage)
            .summary("2024-05".parse().unwrap())
            .unwrap();

        assert_eq!(summary.top_category().unwrap().name(), "Entertainment");
        let over: Vec<_> = summary.over_budget().map(|c| c.name()).collect();
        assert_eq!(over, ["Transport"]);
    }

    #[test]
    fn test_empty_month() {
        let storage = seeded();
        let summary = DashboardService::new(&storage)
            .summary("2023-01".parse().unwrap())
            .unwrap();
        assert_eq!(summary.total_spent, Money::zero());
        assert!(summary.top_category().is_none());
        assert!(summary.overall_progress().is_none());
    }
}
