//! Field-level change summaries for update entries

use serde_json::Value;

const MAX_STRING_CHARS: usize = 40;

/// Summarize top-level field changes between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let v = json!({"name": "Grocery", "icon": "ShoppingCart"});
        assert_eq!(generate_diff(&v, &v), None);
    }

    #[test]
    fn test_changed_added_removed() {
        let before = json!({"amount": 12.5, "notes": "lunch"});
        let after = json!({"amount": 15.0, "items": [{"name": "Milk"}]});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("amount: 12.5 -> 15.0"));
        assert!(diff.contains("notes: \"lunch\" -> (removed)"));
        assert!(diff.contains("items: (added) -> [1 items]"));
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let long = "é".repeat(60);
        let diff = generate_diff(&json!({"notes": long}), &json!({"notes": "short"})).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
