//! Budget repository

use crate::error::FiscalResult;
use crate::models::{Budget, BudgetId, CategoryId, MonthYear};

use super::collection::Collection;

pub type BudgetRepository = Collection<Budget>;

impl Collection<Budget> {
    pub fn get_for_month(&self, month: MonthYear) -> FiscalResult<Vec<Budget>> {
        self.filter(|b| b.month_year == month)
    }

    /// The budget occupying a (category, month) slot, if any
    pub fn find_slot(&self, category_id: &CategoryId, month: MonthYear) -> FiscalResult<Option<Budget>> {
        self.find(|b| b.covers(category_id, month))
    }

    /// Whether a budget other than `except` holds the slot
    pub fn slot_taken(
        &self,
        category_id: &CategoryId,
        month: MonthYear,
        except: Option<&BudgetId>,
    ) -> FiscalResult<bool> {
        Ok(self
            .find_slot(category_id, month)?
            .is_some_and(|b| Some(&b.id) != except))
    }

    /// Distinct months that have at least one budget, newest first
    pub fn months(&self) -> FiscalResult<Vec<MonthYear>> {
        let mut months: Vec<MonthYear> = self.get_all()?.iter().map(|b| b.month_year).collect();
        months.sort_unstable_by(|a, b| b.cmp(a));
        months.dedup();
        Ok(months)
    }
}
