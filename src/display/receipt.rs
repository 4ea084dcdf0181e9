//! Receipt draft display formatting

use crate::services::ReceiptDraft;

/// Numbered item list with the running total
pub fn format_receipt_draft(draft: &ReceiptDraft, symbol: &str) -> String {
    if draft.is_empty() {
        return "No receipt items.\n".to_string();
    }

    let mut output = String::from("Receipt items:\n");
    for (i, item) in draft.items().iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<28} {:>10}\n",
            i + 1,
            item.name,
            item.price.format_with_symbol(symbol)
        ));
    }
    output.push_str(&format!(
        "      {:<28} {:>10}\n",
        "Total",
        draft.total().format_with_symbol(symbol)
    ));
    output
}
