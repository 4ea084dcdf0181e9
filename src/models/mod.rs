//! Core data models for Fiscally Fit
//!
//! Categories, expenses (with optional grocery items) and monthly budgets,
//! plus the value types they are built from.

pub mod budget;
pub mod category;
pub mod expense;
pub mod form;
pub mod icon;
pub mod ids;
pub mod money;
pub mod month;

pub use budget::{Budget, BudgetProgress};
pub use category::{default_categories, Category, GROCERY_CATEGORY_NAME};
pub use expense::{Expense, ExpenseDate, GroceryItem};
pub use form::FormMode;
pub use icon::CategoryIcon;
pub use ids::{BudgetId, CategoryId, ExpenseId, ItemId};
pub use money::Money;
pub use month::MonthYear;
