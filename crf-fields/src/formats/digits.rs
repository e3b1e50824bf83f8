//! Digit counting for numeric "length" limits.

use serde_json::Value;

use crate::coercion::display_number;

/// Counts the ASCII digits in a value's textual form.
///
/// Signs, decimal points and exponents are ignored; `null` and `""` have
/// no digits.
#[must_use]
pub fn digit_count(value: &Value) -> usize {
    let text = match value {
        Value::Null => return 0,
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), display_number),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.bytes().filter(u8::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_digits_only() {
        assert_eq!(digit_count(&json!(1234)), 4);
        assert_eq!(digit_count(&json!(-12)), 2);
        assert_eq!(digit_count(&json!(12.5)), 3);
        assert_eq!(digit_count(&json!(3.0)), 1);
        assert_eq!(digit_count(&json!(0)), 1);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(digit_count(&json!(null)), 0);
        assert_eq!(digit_count(&json!("")), 0);
        assert_eq!(digit_count(&json!("a1b2")), 2);
    }
}
