//! Dashboard display formatting

use super::{format_utilization, pad, progress_bar, text_width};
use crate::services::DashboardSummary;

pub fn format_dashboard(summary: &DashboardSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Dashboard: {}\n", summary.month.display_name()));
    output.push_str(&format!("{:=<width$}\n\n", "", width = 11 + summary.month.display_name().len()));

    output.push_str(&format!(
        "Total spent:   {} across {} expense(s)\n",
        summary.total_spent.format_with_symbol(symbol),
        summary.expense_count
    ));

    match summary.overall_progress() {
        Some(overall) => output.push_str(&format!(
            "Budget used:   {} of {} {} {}\n",
            overall.spent.format_with_symbol(symbol),
            overall.budgeted.format_with_symbol(symbol),
            progress_bar(&overall),
            format_utilization(&overall)
        )),
        None => output.push_str("Budget used:   no budgets set\n"),
    }

    if let Some(top) = summary.top_category() {
        output.push_str(&format!(
            "Top category:  {} ({})\n",
            top.name(),
            top.spent.format_with_symbol(symbol)
        ));
    }

    if summary.categories.is_empty() {
        output.push_str("\nNo spending recorded this month.\n");
        return output;
    }

    let name_width = summary
        .categories
        .iter()
        .map(|c| text_width(c.name()))
        .max()
        .unwrap_or(8)
        .max(8);

    output.push_str("\nBy category:\n");
    for row in &summary.categories {
        let budget = match row.progress() {
            Some(progress) => format!(
                "of {} {}{}",
                progress.budgeted.format_with_symbol(symbol),
                format_utilization(&progress),
                if progress.is_over_budget() { " OVER" } else { "" }
            ),
            None => "no budget".to_string(),
        };
        output.push_str(&format!(
            "  {}  {:>12}  {}\n",
            pad(row.name(), name_width),
            row.spent.format_with_symbol(symbol),
            budget
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, MonthYear};
    use crate::services::CategorySpending;

    #[test]
    fn test_dashboard_sections() {
        let summary = DashboardSummary {
            month: MonthYear::new(2024, 5).unwrap(),
            total_spent: Money::from_cents(15_000),
            expense_count: 3,
            total_budgeted: Money::from_cents(10_000),
            budgeted_spent: Money::from_cents(12_000),
            categories: vec![CategorySpending {
                category_id: CategoryId::from_raw("cat_transport"),
                category: None,
                spent: Money::from_cents(12_000),
                budgeted: Some(Money::from_cents(10_000)),
            }],
        };

        let output = format_dashboard(&summary, "$");
        assert!(output.starts_with("Dashboard: May 2024"));
        assert!(output.contains("Total spent:   $150.00 across 3 expense(s)"));
        assert!(output.contains("120%"));
        assert!(output.contains("OVER"));
        assert!(output.contains("Top category:  Unknown ($120.00)"));
    }
}
