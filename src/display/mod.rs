//! Display formatting for terminal output
//!
//! Plain-text tables and summaries for categories, expenses, budgets, the
//! dashboard and receipt drafts. Amounts are rendered with the configured
//! currency symbol.

pub mod budget;
pub mod category;
pub mod dashboard;
pub mod expense;
pub mod receipt;

pub use budget::format_budget_list;
pub use category::{format_category_list, format_icon_list};
pub use dashboard::format_dashboard;
pub use expense::{format_expense_details, format_expense_list};
pub use receipt::format_receipt_draft;

use crate::models::BudgetProgress;

const BAR_WIDTH: usize = 20;

/// Text progress bar, e.g. `[#########-----------]`
pub fn progress_bar(progress: &BudgetProgress) -> String {
    let filled = ((progress.progress_percent() / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Utilization as shown to the user; an unbounded value prints as `∞%`
pub fn format_utilization(progress: &BudgetProgress) -> String {
    let percent = progress.utilization_percent();
    if percent.is_finite() {
        format!("{:.0}%", percent)
    } else {
        "∞%".to_string()
    }
}

pub(crate) fn text_width(s: &str) -> usize {
    s.chars().count()
}

pub(crate) fn pad(s: &str, width: usize) -> String {
    let len = text_width(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
