//! Type-aware coercion of a field's default value.

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{is_truthy, stringify, to_finite_number};
use crate::core::FieldType;

/// A default value in the canonical shape for its field type.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Checkbox default.
    Bool(bool),
    /// Numeric default.
    Number(f64),
    /// The "present but empty" numeric default, serialized as `""`.
    Empty,
    /// Text, single choice, date or time default.
    Text(String),
    /// Multi-select radio default.
    List(Vec<String>),
}

impl DefaultValue {
    /// Converts to the JSON value persisted in a constraint record.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Value::from(*n as i64),
            Self::Number(n) => Value::from(*n),
            Self::Empty => Value::String(String::new()),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Coerces a raw default into the canonical shape for `field_type`.
///
/// `None` in means no default was supplied and yields `None`, which is
/// distinct from a present-but-empty default. `slider` and `file` fields
/// never carry a default.
#[must_use]
pub fn coerce_default(field_type: FieldType, value: Option<&Value>) -> Option<DefaultValue> {
    let value = value?;

    match field_type {
        FieldType::Checkbox => Some(DefaultValue::Bool(is_truthy(value))),

        FieldType::Number => match value {
            Value::Null => Some(DefaultValue::Empty),
            Value::String(s) if s.is_empty() => Some(DefaultValue::Empty),
            other => Some(to_finite_number(other).map_or(DefaultValue::Empty, DefaultValue::Number)),
        },

        // Radios may be multi-select, so an existing sequence stays a sequence.
        FieldType::Radio => match value {
            Value::Array(items) => Some(DefaultValue::List(
                items
                    .iter()
                    .filter(|v| !v.is_null() && !v.is_array() && !v.is_object())
                    .map(stringify)
                    .collect(),
            )),
            other => Some(DefaultValue::Text(string_or_empty(other))),
        },

        FieldType::Select | FieldType::Date | FieldType::Time => {
            Some(DefaultValue::Text(string_or_empty(value)))
        }

        FieldType::Text | FieldType::Textarea => Some(DefaultValue::Text(match value {
            Value::Null => String::new(),
            other => stringify(other),
        })),

        FieldType::Slider | FieldType::File => None,
    }
}

fn string_or_empty(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(t: FieldType, v: Value) -> Option<DefaultValue> {
        coerce_default(t, Some(&v))
    }

    #[test]
    fn test_absent_stays_absent() {
        for t in FieldType::ALL {
            assert_eq!(coerce_default(t, None), None);
        }
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(coerce(FieldType::Checkbox, json!("yes")), Some(DefaultValue::Bool(true)));
        assert_eq!(coerce(FieldType::Checkbox, json!(0)), Some(DefaultValue::Bool(false)));
        assert_eq!(coerce(FieldType::Checkbox, json!(null)), Some(DefaultValue::Bool(false)));
    }

    #[test]
    fn test_number() {
        assert_eq!(coerce(FieldType::Number, json!("42")), Some(DefaultValue::Number(42.0)));
        assert_eq!(coerce(FieldType::Number, json!(1.5)), Some(DefaultValue::Number(1.5)));
        assert_eq!(coerce(FieldType::Number, json!("")), Some(DefaultValue::Empty));
        assert_eq!(coerce(FieldType::Number, json!(null)), Some(DefaultValue::Empty));
        assert_eq!(coerce(FieldType::Number, json!("abc")), Some(DefaultValue::Empty));
        assert_eq!(coerce(FieldType::Number, json!({"a": 1})), Some(DefaultValue::Empty));
    }

    #[test]
    fn test_radio_keeps_sequences() {
        assert_eq!(
            coerce(FieldType::Radio, json!(["a", 2, true, null])),
            Some(DefaultValue::List(vec!["a".into(), "2".into(), "true".into()]))
        );
        assert_eq!(coerce(FieldType::Radio, json!("a")), Some(DefaultValue::Text("a".into())));
        assert_eq!(coerce(FieldType::Radio, json!(3)), Some(DefaultValue::Text(String::new())));
    }

    #[test]
    fn test_select_is_single_string() {
        assert_eq!(coerce(FieldType::Select, json!("42")), Some(DefaultValue::Text("42".into())));
        assert_eq!(coerce(FieldType::Select, json!(42)), Some(DefaultValue::Text(String::new())));
        assert_eq!(coerce(FieldType::Select, json!(["a"])), Some(DefaultValue::Text(String::new())));
    }

    #[test]
    fn test_date_and_time_pass_strings_through() {
        assert_eq!(
            coerce(FieldType::Date, json!("not a date")),
            Some(DefaultValue::Text("not a date".into()))
        );
        assert_eq!(coerce(FieldType::Time, json!(1345)), Some(DefaultValue::Text(String::new())));
    }

    #[test]
    fn test_text_stringifies() {
        assert_eq!(coerce(FieldType::Text, json!(null)), Some(DefaultValue::Text(String::new())));
        assert_eq!(coerce(FieldType::Textarea, json!(7)), Some(DefaultValue::Text("7".into())));
        assert_eq!(coerce(FieldType::Text, json!(false)), Some(DefaultValue::Text("false".into())));
    }

    #[test]
    fn test_slider_and_file_never_default() {
        assert_eq!(coerce(FieldType::Slider, json!(3)), None);
        assert_eq!(coerce(FieldType::File, json!("a.pdf")), None);
    }

    #[test]
    fn test_to_json_shapes() {
        assert_eq!(DefaultValue::Empty.to_json(), json!(""));
        assert_eq!(DefaultValue::Number(3.0).to_json(), json!(3));
        assert_eq!(DefaultValue::Number(0.5).to_json(), json!(0.5));
        assert_eq!(
            serde_json::to_value(DefaultValue::List(vec!["x".into()])).unwrap(),
            json!(["x"])
        );
    }
}
