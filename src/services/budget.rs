//! Budget service
//!
//! Monthly spending goals per category and how much of each has been used.
//! A (category, month) pair holds at most one budget.

use crate::audit::EntityType;
use crate::error::{FiscalError, FiscalResult};
use crate::models::{Budget, BudgetId, BudgetProgress, Category, CategoryId, FormMode, Money, MonthYear};
use crate::storage::Storage;

/// Fields of the budget form
#[derive(Debug, Clone, Default)]
pub struct BudgetDraft {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub month_year: Option<MonthYear>,
}

impl BudgetDraft {
    pub fn new(category_id: CategoryId, amount: Money, month_year: MonthYear) -> Self {
        Self {
            category_id: Some(category_id),
            amount: Some(amount),
            month_year: Some(month_year),
        }
    }

    /// A draft that only changes the amount, for editing
    pub fn amount_only(amount: Money) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }
}

/// A budget together with its category and spend so far
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget: Budget,
    /// `None` when the category has been deleted
    pub category: Option<Category>,
    pub progress: BudgetProgress,
}

impl BudgetStatus {
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("Unknown", |c| c.name.as_str())
    }
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self, id: &BudgetId) -> FiscalResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Save the budget form in either mode
    ///
    /// Editing changes the amount only; category and month are fixed once set.
    pub fn submit(&self, mode: FormMode<BudgetId>, draft: BudgetDraft) -> FiscalResult<Budget> {
        let amount = draft
            .amount
            .filter(|a| a.is_positive())
            .ok_or_else(|| FiscalError::Validation("Budget amount must be greater than zero".into()))?;

        match mode {
            FormMode::Creating => {
                let (category_id, month_year) = match (draft.category_id, draft.month_year) {
                    (Some(category_id), Some(month_year)) => (category_id, month_year),
                    _ => {
                        return Err(FiscalError::Validation(
                            "Budget category and month are required".into(),
                        ))
                    }
                };
                let category = self
                    .storage
                    .categories
                    .get(&category_id)?
                    .ok_or_else(|| FiscalError::category_not_found(category_id.as_str()))?;

                if self.storage.budgets.slot_taken(&category_id, month_year, None)? {
                    return Err(FiscalError::Conflict {
                        entity_type: "Budget",
                        identifier: format!("{} for {}", category.name, month_year),
                    });
                }

                let budget = Budget::new(category_id, amount, month_year);
                budget
                    .validate()
                    .map_err(|e| FiscalError::Validation(e.to_string()))?;

                self.storage.budgets.upsert_and_save(budget.clone())?;
                tracing::info!(id = %budget.id, month = %month_year, "budget created");

                self.storage.log_create(
                    EntityType::Budget,
                    budget.id.to_string(),
                    Some(format!("{} {}", category.name, month_year)),
                    &budget,
                );
                Ok(budget)
            }
            FormMode::Editing(id) => {
                let before = self
                    .storage
                    .budgets
                    .get(&id)?
                    .ok_or_else(|| FiscalError::budget_not_found(id.as_str()))?;

                let moved = draft
                    .category_id
                    .is_some_and(|c| c != before.category_id)
                    || draft.month_year.is_some_and(|m| m != before.month_year);
                if moved {
                    return Err(FiscalError::Validation(
                        "A budget's category and month cannot be changed".into(),
                    ));
                }

                if self
                    .storage
                    .budgets
                    .slot_taken(&before.category_id, before.month_year, Some(&before.id))?
                {
                    return Err(FiscalError::Conflict {
                        entity_type: "Budget",
                        identifier: format!("{} for {}", before.category_id, before.month_year),
                    });
                }

                let budget = Budget {
                    amount,
                    ..before.clone()
                };
                self.storage.budgets.upsert_and_save(budget.clone())?;
                tracing::info!(id = %budget.id, "budget updated");

                self.storage.log_update(
                    EntityType::Budget,
                    budget.id.to_string(),
                    Some(budget.month_year.to_string()),
                    &before,
                    &budget,
                );
                Ok(budget)
            }
        }
    }

    pub fn create(
        &self,
        category_id: CategoryId,
        amount: Money,
        month_year: MonthYear,
    ) -> FiscalResult<Budget> {
        self.submit(FormMode::Creating, BudgetDraft::new(category_id, amount, month_year))
    }

    pub fn set_amount(&self, id: &BudgetId, amount: Money) -> FiscalResult<Budget> {
        self.submit(FormMode::Editing(id.clone()), BudgetDraft::amount_only(amount))
    }

    /// Sum of expenses in the category whose date falls in the month
    pub fn spent(&self, category_id: &CategoryId, month_year: MonthYear) -> FiscalResult<Money> {
        self.storage.expenses.spent_in(category_id, month_year)
    }

    pub fn progress(&self, budget: &Budget) -> FiscalResult<BudgetProgress> {
        let spent = self.spent(&budget.category_id, budget.month_year)?;
        Ok(BudgetProgress::new(budget.amount, spent))
    }

    /// Budgets for a month with progress, sorted by category name
    pub fn list_for_month(&self, month_year: MonthYear) -> FiscalResult<Vec<BudgetStatus>> {
        let mut statuses = self
            .storage
            .budgets
            .get_for_month(month_year)?
            .into_iter()
            .map(|budget| -> FiscalResult<BudgetStatus> {
                Ok(BudgetStatus {
                    category: self.storage.categories.get(&budget.category_id)?,
                    progress: self.progress(&budget)?,
                    budget,
                })
            })
            .collect::<FiscalResult<Vec<_>>>()?;

        statuses.sort_by_cached_key(|s| s.category_name().to_lowercase());
        Ok(statuses)
    }

    /// Months that have budgets, newest first
    pub fn months(&self) -> FiscalResult<Vec<MonthYear>> {
        self.storage.budgets.months()
    }

    /// Delete by id; a missing id is a no-op
    pub fn delete(&self, id: &BudgetId) -> FiscalResult<Option<Budget>> {
        let removed = self.storage.budgets.delete_and_save(id)?;

        if let Some(budget) = &removed {
            tracing::info!(id = %budget.id, "budget deleted");
            self.storage.log_delete(
                EntityType::Budget,
                budget.id.to_string(),
                Some(budget.month_year.to_string()),
                budget,
            );
        }
        Ok(removed)
    }
}
