//! Service layer for Fiscally Fit
//!
//! Business rules on top of the storage layer: form validation, uniqueness,
//! computed spend and progress. Every successful write is audited.

pub mod budget;
pub mod category;
pub mod dashboard;
pub mod expense;
pub mod receipt;

pub use budget::{BudgetDraft, BudgetService, BudgetStatus};
pub use category::{CategoryDraft, CategoryService};
pub use dashboard::{CategorySpending, DashboardService, DashboardSummary};
pub use expense::{ExpenseDraft, ExpenseService};
pub use receipt::{ReceiptDraft, ReceiptService};
