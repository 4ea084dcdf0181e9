//! Expense display formatting

use std::collections::HashMap;

use super::{pad, text_width};
use crate::models::{Category, CategoryId, Expense};

fn category_label(names: &HashMap<&CategoryId, &Category>, id: &CategoryId) -> String {
    names
        .get(id)
        .map(|c| format!("{} {}", c.icon.glyph(), c.name))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Format expenses as a table, in the order given
pub fn format_expense_list(expenses: &[Expense], categories: &[Category], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let by_id: HashMap<&CategoryId, &Category> = categories.iter().map(|c| (&c.id, c)).collect();
    let labels: Vec<String> = expenses
        .iter()
        .map(|e| category_label(&by_id, &e.category_id))
        .collect();
    let category_width = labels.iter().map(|l| text_width(l)).max().unwrap_or(8).max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {}  {:>12}  {:<14}  {}\n",
        "Date",
        pad("Category", category_width),
        "Amount",
        "ID",
        "Notes"
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<cw$}  {:->12}  {:-<14}  {:-<5}\n",
        "",
        "",
        "",
        "",
        "",
        cw = category_width
    ));

    for (expense, label) in expenses.iter().zip(&labels) {
        let mut notes = expense.notes.clone().unwrap_or_default();
        if expense.item_count() > 0 {
            if !notes.is_empty() {
                notes.push(' ');
            }
            notes.push_str(&format!("({} items)", expense.item_count()));
        }

        output.push_str(&format!(
            "{:<10}  {}  {:>12}  {:<14}  {}\n",
            expense.date.format("%Y-%m-%d"),
            pad(label, category_width),
            expense.amount.format_with_symbol(symbol),
            expense.id.short(),
            notes
        ));
    }

    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "\n{} expense(s), total {}\n",
        expenses.len(),
        total.format_with_symbol(symbol)
    ));
    output
}

/// One expense with its item list
pub fn format_expense_details(expense: &Expense, category: Option<&Category>, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Date:     {}\n", expense.date_string()));
    output.push_str(&format!(
        "  Category: {}\n",
        category.map_or("Unknown", |c| c.name.as_str())
    ));
    output.push_str(&format!("  Amount:   {}\n", expense.amount.format_with_symbol(symbol)));
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("  Notes:    {}\n", notes));
    }

    if let Some(items) = &expense.items {
        output.push_str("  Items:\n");
        for item in items {
            output.push_str(&format!(
                "    {:<24} {:>10}\n",
                item.name,
                item.price.format_with_symbol(symbol)
            ));
        }
        if let Some(items_total) = expense.items_total() {
            if items_total != expense.amount {
                output.push_str(&format!(
                    "  Items total {} differs from the amount\n",
                    items_total.format_with_symbol(symbol)
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, GroceryItem, Money};
    use chrono::{TimeZone, Utc};

    fn expense(category: &str, cents: i64) -> Expense {
        Expense::new(
            CategoryId::from_raw(category),
            Money::from_cents(cents),
            Utc.with_ymd_and_hms(2024, 5, 3, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_list_uses_symbol_and_total() {
        let expenses = vec![expense("cat_grocery", 123_456), expense("cat_gone", 100)];
        let output = format_expense_list(&expenses, &default_categories(), "€");

        assert!(output.contains("€1,234.56"));
        assert!(output.contains("Grocery"));
        assert!(output.contains("Unknown"));
        assert!(output.contains("2 expense(s), total €1,235.56"));
    }

    #[test]
    fn test_details_flags_item_mismatch() {
        let mut e = expense("cat_grocery", 1_000);
        e.items = Some(vec![GroceryItem::new("Milk", Money::from_cents(250))]);

        let categories = default_categories();
        let output = format_expense_details(&e, categories.first(), "$");
        assert!(output.contains("Milk"));
        assert!(output.contains("Items total $2.50 differs"));
    }
}
