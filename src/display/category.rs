//! Category display formatting

use super::{pad, text_width};
use crate::models::{Category, CategoryIcon};

/// Format categories as a table in stored order
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'fiscally category add <name>' to create one.\n"
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| text_width(&c.name))
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "    {}  {:<14}  {}\n",
        pad("Category", name_width),
        "Icon",
        "ID"
    ));
    output.push_str(&format!(
        "    {:-<width$}  {:-<14}  {:-<12}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<2}  {}  {:<14}  {}\n",
            category.icon.glyph(),
            pad(&category.name, name_width),
            category.icon.name(),
            category.id
        ));
    }

    output
}

/// Every supported icon with its glyph
pub fn format_icon_list() -> String {
    let mut output = String::from("Available icons:\n");
    for icon in CategoryIcon::ALL {
        let marker = if *icon == CategoryIcon::FALLBACK {
            " (default)"
        } else {
            ""
        };
        output.push_str(&format!("  {:<2}  {}{}\n", icon.glyph(), icon.name(), marker));
    }
    output
}
