//! Field-level diffs for audit entries

use serde_json::Value;

/// Describe top-level field changes between two document bodies
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
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
        _ if before != after => Some(format!("{} -> {}", format_value(before), format_value(after))),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"item": "Sewa Gedung", "amount": 5000000});
        let after = json!({"item": "Sewa Gedung", "amount": 5500000});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("amount: 5000000 -> 5500000")
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"notes": "lama"});
        let after = json!({"phone": "0812"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("notes: \"lama\" -> (removed)"));
        assert!(diff.contains("phone: (added) -> \"0812\""));
    }

    #[test]
    fn test_no_changes() {
        let body = json!({"name": "Catering Horas"});
        assert!(generate_diff(&body, &body).is_none());
    }

    #[test]
    fn test_long_text_is_truncated_on_char_boundary() {
        let long = "é".repeat(60);
        let formatted = format_value(&json!(long));
        assert!(formatted.ends_with("...\""));
        assert_eq!(formatted.chars().count(), 47 + 5);
    }
}
