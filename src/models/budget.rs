//! Budget model
//!
//! A budget is a spending ceiling for one category in one calendar month.
//! At most one budget exists per (category, month); the budget service checks
//! that on every write.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::month::MonthYear;

/// A monthly spending goal for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub month_year: MonthYear,
}

impl Budget {
    pub fn new(category_id: CategoryId, amount: Money, month_year: MonthYear) -> Self {
        Self {
            id: BudgetId::new(),
            category_id,
            amount,
            month_year,
        }
    }

    /// Whether this budget occupies the given (category, month) slot
    pub fn covers(&self, category_id: &CategoryId, month_year: MonthYear) -> bool {
        &self.category_id == category_id && self.month_year == month_year
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }
        if self.category_id.as_str().trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.amount, self.month_year)
    }
}

/// How much of a budget has been used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    pub budgeted: Money,
    pub spent: Money,
}

impl BudgetProgress {
    pub fn new(budgeted: Money, spent: Money) -> Self {
        Self { budgeted, spent }
    }

    /// Spent as a percentage of the ceiling, uncapped
    ///
    /// A zero ceiling with positive spend is unbounded (`f64::INFINITY`); a
    /// zero ceiling with nothing spent is 0%.
    pub fn utilization_percent(&self) -> f64 {
        if self.budgeted.is_zero() {
            return if self.spent.is_positive() {
                f64::INFINITY
            } else {
                0.0
            };
        }
        self.spent.cents() as f64 * 100.0 / self.budgeted.cents() as f64
    }

    /// Utilization clamped to 0..=100 for progress bars
    pub fn progress_percent(&self) -> f64 {
        self.utilization_percent().clamp(0.0, 100.0)
    }

    /// Spending strictly exceeds the ceiling
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budgeted
    }

    /// Ceiling minus spend; negative once over budget
    pub fn remaining(&self) -> Money {
        self.budgeted - self.spent
    }

    /// How far spending exceeds the ceiling (zero when within budget)
    pub fn overage(&self) -> Money {
        if self.is_over_budget() {
            self.spent - self.budgeted
        } else {
            Money::zero()
        }
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount,
    MissingCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than zero"),
            Self::MissingCategory => write!(f, "Budget category is required"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn may() -> MonthYear {
        "2024-05".parse().unwrap()
    }

    #[test]
    fn test_storage_shape() {
        let mut budget = Budget::new(CategoryId::from_raw("cat_grocery"), Money::from_cents(30_000), may());
        budget.id = BudgetId::from_raw("bud_1");
        let json = serde_json::to_string(&budget).unwrap();
        assert_eq!(
            json,
            r#"{"id":"bud_1","categoryId":"cat_grocery","amount":300.0,"monthYear":"2024-05"}"#
        );
    }

    #[test]
    fn test_covers() {
        let cat = CategoryId::from_raw("cat_grocery");
        let budget = Budget::new(cat.clone(), Money::from_cents(100), may());
        assert!(budget.covers(&cat, may()));
        assert!(!budget.covers(&cat, may().next()));
        assert!(!budget.covers(&CategoryId::from_raw("cat_rent"), may()));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new(CategoryId::from_raw("cat_rent"), Money::zero(), may());
        assert_eq!(budget.validate(), Err(BudgetValidationError::NonPositiveAmount));
        budget.amount = Money::from_cents(1);
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_progress_within_budget() {
        let progress = BudgetProgress::new(Money::from_cents(10_000), Money::from_cents(2_500));
        assert_eq!(progress.utilization_percent(), 25.0);
        assert!(!progress.is_over_budget());
        assert_eq!(progress.remaining(), Money::from_cents(7_500));
        assert_eq!(progress.overage(), Money::zero());
    }

    #[test]
    fn test_progress_exactly_at_ceiling() {
        let progress = BudgetProgress::new(Money::from_cents(10_000), Money::from_cents(10_000));
        assert_eq!(progress.utilization_percent(), 100.0);
        assert!(!progress.is_over_budget());
        assert_eq!(progress.remaining(), Money::zero());
    }

    #[test]
    fn test_progress_over_budget() {
        let progress = BudgetProgress::new(Money::from_cents(10_000), Money::from_cents(12_000));
        assert_eq!(progress.utilization_percent(), 120.0);
        assert_eq!(progress.progress_percent(), 100.0);
        assert!(progress.is_over_budget());
        assert_eq!(progress.overage(), Money::from_cents(2_000));
    }

    #[test]
    fn test_zero_ceiling() {
        let spent = BudgetProgress::new(Money::zero(), Money::from_cents(1));
        assert!(spent.utilization_percent() >= 100.0);
        assert!(spent.is_over_budget());

        let idle = BudgetProgress::new(Money::zero(), Money::zero());
        assert_eq!(idle.utilization_percent(), 0.0);
        assert!(!idle.is_over_budget());
    }
}
