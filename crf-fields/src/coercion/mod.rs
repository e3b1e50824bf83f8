//! Explicit, total conversions from untyped JSON values.
//!
//! Raw constraint maps and default values come straight from a form
//! builder and may hold anything. Every conversion here is total: a value
//! that cannot be converted becomes "absent" (`None`) or an empty sentinel,
//! never an error.
//!
//! | source            | [`is_truthy`] | [`to_finite_number`] |
//! |-------------------|---------------|----------------------|
//! | `null`            | false         | absent               |
//! | `true` / `false`  | itself        | 1 / 0                |
//! | number            | `!= 0`        | itself if finite     |
//! | `""`              | false         | absent               |
//! | `" 12 "`          | true          | 12                   |
//! | `"abc"`           | true          | absent               |
//! | array / object    | true          | absent               |

mod defaults;

pub use defaults::{coerce_default, DefaultValue};

use serde_json::Value;

/// Returns the JSON truthiness of a value.
///
/// `null`, `false`, `0`, `""` are false; everything else, including empty
/// arrays and objects, is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Converts a value to a finite number, or `None` when it has no sensible
/// numeric reading.
#[must_use]
pub fn to_finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Renders a number the way form UIs show it: integral values without a
/// fractional part.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn display_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Stringifies a scalar JSON value. Compound values are rendered as JSON.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), display_number),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Returns the value as a string only if it already is one.
#[must_use]
pub fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}
