//! Budget display formatting

use super::{format_utilization, pad, progress_bar, text_width};
use crate::models::{Money, MonthYear};
use crate::services::BudgetStatus;

/// Budgets for a month with a progress bar each
pub fn format_budget_list(month: MonthYear, statuses: &[BudgetStatus], symbol: &str) -> String {
    let mut output = format!("Budgets for {}\n\n", month.display_name());

    if statuses.is_empty() {
        output.push_str("No budgets set for this month.\n");
        return output;
    }

    let name_width = statuses
        .iter()
        .map(|s| text_width(s.category_name()))
        .max()
        .unwrap_or(8)
        .max(8);

    for status in statuses {
        let progress = &status.progress;
        let flag = if progress.is_over_budget() {
            format!("  OVER by {}", progress.overage().format_with_symbol(symbol))
        } else {
            String::new()
        };
        output.push_str(&format!(
            "{}  {} / {}  {} {:>5}{}\n",
            pad(status.category_name(), name_width),
            progress.spent.format_with_symbol(symbol),
            progress.budgeted.format_with_symbol(symbol),
            progress_bar(progress),
            format_utilization(progress),
            flag
        ));
        output.push_str(&format!(
            "{}  id: {}\n",
            " ".repeat(name_width),
            status.budget.id
        ));
    }

    let budgeted: Money = statuses.iter().map(|s| s.progress.budgeted).sum();
    let spent: Money = statuses.iter().map(|s| s.progress.spent).sum();
    output.push_str(&format!(
        "\nTotal: {} of {} spent\n",
        spent.format_with_symbol(symbol),
        budgeted.format_with_symbol(symbol)
    ));
    output
}
