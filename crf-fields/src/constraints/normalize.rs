//! The constraint normalizer.
//!
//! `normalize` is total and idempotent: any raw input, however malformed,
//! yields a record that upholds the per-type invariants, and normalizing
//! that record's map again yields the same record.

use serde_json::{Map, Value};
use tracing::debug;

use super::keys;
use super::slider;
use super::types::{
    BaseConstraints, ChoiceConstraints, DateConstraints, FileConstraints, NormalizedConstraints,
    NumberConstraints, SliderConstraints, StoragePreference, TextConstraints, TextTransform,
    TimeConstraints,
};
use crate::coercion::{coerce_default, is_truthy, to_finite_number};
use crate::config::EngineConfig;
use crate::core::FieldType;
use crate::formats::DateFormat;

/// Normalizes raw constraint maps into typed records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    default_date_format: DateFormat,
    default_max_size_mb: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Normalizer {
    /// Creates a normalizer using the defaults in `config`.
    #[must_use]
    pub const fn new(config: &EngineConfig) -> Self {
        Self {
            default_date_format: config.default_date_format,
            default_max_size_mb: config.default_max_size_mb,
        }
    }

    /// Normalizes `raw` for a field of type `field_type`.
    ///
    /// Anything other than a JSON object is treated as an empty map.
    #[must_use]
    pub fn normalize(&self, field_type: FieldType, raw: &Value) -> NormalizedConstraints {
        let mut c = raw.as_object().cloned().unwrap_or_default();

        // Options belong to the field, not its constraints.
        c.remove(keys::OPTIONS);

        for key in keys::BOOLEAN_KEYS {
            if let Some(v) = c.get_mut(*key) {
                *v = Value::Bool(is_truthy(v));
            }
        }

        // Non-finite numbers are removed, never replaced by zero.
        for key in keys::NUMERIC_KEYS {
            match c.get(*key).map(to_finite_number) {
                Some(Some(n)) => {
                    c.insert((*key).to_string(), Value::from(n));
                }
                Some(None) => {
                    c.remove(*key);
                }
                None => {}
            }
        }

        migrate_legacy_digits(field_type, &mut c);
        log_dropped_keys(field_type, &c);

        match field_type {
            FieldType::Text | FieldType::Textarea => NormalizedConstraints::Text(text(&c)),
            FieldType::Number => NormalizedConstraints::Number(number(&c)),
            FieldType::Checkbox => {
                let mut record = base(field_type, &c);
                record.placeholder = None;
                NormalizedConstraints::Checkbox(record)
            }
            FieldType::Radio => NormalizedConstraints::Choice(ChoiceConstraints {
                base: base(field_type, &c),
                allow_multiple: bool_at(&c, keys::ALLOW_MULTIPLE),
            }),
            FieldType::Select => NormalizedConstraints::Choice(ChoiceConstraints {
                base: base(field_type, &c),
                allow_multiple: None,
            }),
            FieldType::Date => NormalizedConstraints::Date(self.date(&c)),
            FieldType::Time => NormalizedConstraints::Time(time(&c)),
            FieldType::Slider => NormalizedConstraints::Slider(slider_constraints(&c)),
            FieldType::File => NormalizedConstraints::File(self.file(&c)),
        }
    }

    fn date(&self, c: &Map<String, Value>) -> DateConstraints {
        let date_format = string_at(c, keys::DATE_FORMAT)
            .and_then(|f| DateFormat::from_pattern(&f))
            .unwrap_or(self.default_date_format);
        let mut min_date = string_at(c, keys::MIN_DATE).unwrap_or_default();
        let mut max_date = string_at(c, keys::MAX_DATE).unwrap_or_default();

        if date_format.compare(&min_date, &max_date) == Some(std::cmp::Ordering::Greater) {
            std::mem::swap(&mut min_date, &mut max_date);
        }

        DateConstraints {
            base: base(FieldType::Date, c),
            min_date,
            max_date,
            date_format,
        }
    }

    fn file(&self, c: &Map<String, Value>) -> FileConstraints {
        let storage_preference = match string_at(c, keys::STORAGE_PREFERENCE) {
            Some(p) if p.trim().eq_ignore_ascii_case("url") => StoragePreference::Url,
            _ => StoragePreference::Local,
        };
        let max_size_mb = number_at(c, keys::MAX_SIZE_MB)
            .filter(|n| *n > 0.0)
            .unwrap_or(self.default_max_size_mb);

        let allowed_formats = dedupe(
            string_list(c.get(keys::ALLOWED_FORMATS))
                .into_iter()
                .map(|f| f.trim().to_lowercase())
                .filter(|f| !f.is_empty()),
        );
        let modalities = dedupe(
            string_list(c.get(keys::MODALITIES))
                .into_iter()
                .filter(|m| !m.is_empty()),
        );

        FileConstraints {
            base: minimal_base(c),
            storage_preference: Some(storage_preference),
            allowed_formats,
            max_size_mb,
            modalities,
            allow_multiple_files: bool_at(c, keys::ALLOW_MULTIPLE_FILES),
        }
    }
}

/// Normalizes `raw` for `field_type` using the default configuration.
///
/// # Examples
///
/// ```
/// use crf_fields::{normalize_constraints, FieldType};
/// use serde_json::json;
///
/// let c = normalize_constraints(FieldType::Checkbox, &json!({"placeholder": "x", "min": 5}));
/// assert!(c.to_map().is_empty());
/// ```
#[must_use]
pub fn normalize_constraints(field_type: FieldType, raw: &Value) -> NormalizedConstraints {
    Normalizer::default().normalize(field_type, raw)
}

fn migrate_legacy_digits(field_type: FieldType, c: &mut Map<String, Value>) {
    if let Some(legacy) = c.remove(keys::LEGACY_MAX_DIGITS) {
        c.entry(keys::MAX_DIGITS).or_insert(legacy);
    }
    // Older integer fields stored their digit limit as a text-style maxLength.
    if field_type == FieldType::Number
        && !c.contains_key(keys::MAX_DIGITS)
        && bool_at(c, keys::INTEGER_ONLY) == Some(true)
    {
        if let Some(limit) = c.remove(keys::MAX_LENGTH) {
            c.insert(keys::MAX_DIGITS.to_string(), limit);
        }
    }
}

fn log_dropped_keys(field_type: FieldType, c: &Map<String, Value>) {
    let allowed = keys::allowed_keys(field_type);
    let dropped: Vec<&str> = c
        .keys()
        .map(String::as_str)
        .filter(|k| !allowed.contains(k))
        .collect();
    if !dropped.is_empty() {
        debug!(field_type = %field_type, dropped = ?dropped, "Dropping constraint keys");
    }
}

fn base(field_type: FieldType, c: &Map<String, Value>) -> BaseConstraints {
    BaseConstraints {
        placeholder: string_at(c, keys::PLACEHOLDER),
        default_value: coerce_default(field_type, c.get(keys::DEFAULT_VALUE)),
        ..minimal_base(c)
    }
}

fn minimal_base(c: &Map<String, Value>) -> BaseConstraints {
    BaseConstraints {
        required: bool_at(c, keys::REQUIRED),
        readonly: bool_at(c, keys::READONLY),
        help_text: string_at(c, keys::HELP_TEXT),
        placeholder: None,
        default_value: None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn text(c: &Map<String, Value>) -> TextConstraints {
    let length = |key: &str| number_at(c, key).map(|n: f64| n.max(0.0).floor() as u64);
    let (min_length, max_length) = ordered(length(keys::MIN_LENGTH), length(keys::MAX_LENGTH));

    // An unrecognised transform resets to "none" rather than disappearing.
    let transform = c.get(keys::TRANSFORM).map(|t| {
        t.as_str()
            .and_then(TextTransform::parse)
            .unwrap_or(TextTransform::None)
    });

    TextConstraints {
        base: base(FieldType::Text, c),
        min_length,
        max_length,
        pattern: string_at(c, keys::PATTERN).filter(|p| !p.is_empty()),
        transform,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn number(c: &Map<String, Value>) -> NumberConstraints {
    let (min, max) = ordered(number_at(c, keys::MIN), number_at(c, keys::MAX));

    let digits = |key: &str| {
        number_at(c, key).map(|n: f64| n.round().clamp(0.0, f64::from(u32::MAX)) as u32)
    };
    let (min_digits, max_digits) = ordered(digits(keys::MIN_DIGITS), digits(keys::MAX_DIGITS));

    let integer_only = bool_at(c, keys::INTEGER_ONLY);
    let step = number_at(c, keys::STEP)
        .filter(|s| integer_only != Some(true) || s.fract() == 0.0);

    NumberConstraints {
        base: base(FieldType::Number, c),
        min,
        max,
        step,
        integer_only,
        min_digits,
        max_digits,
    }
}

fn time(c: &Map<String, Value>) -> TimeConstraints {
    // Present bounds are forced to strings; absent bounds stay absent.
    let bound = |key: &str| c.get(key).map(|v: &Value| v.as_str().unwrap_or_default().to_string());

    TimeConstraints {
        base: base(FieldType::Time, c),
        min_time: bound(keys::MIN_TIME),
        max_time: bound(keys::MAX_TIME),
        step: number_at(c, keys::STEP),
    }
}

fn slider_constraints(c: &Map<String, Value>) -> SliderConstraints {
    let (min, max, mode) = slider::resolve(c);
    SliderConstraints {
        base: minimal_base(c),
        min,
        max,
        mode,
    }
}

fn ordered<T: PartialOrd>(lo: Option<T>, hi: Option<T>) -> (Option<T>, Option<T>) {
    match (lo, hi) {
        (Some(a), Some(b)) if b < a => (Some(b), Some(a)),
        other => other,
    }
}

fn bool_at(c: &Map<String, Value>, key: &str) -> Option<bool> {
    c.get(key).map(is_truthy)
}

fn number_at(c: &Map<String, Value>, key: &str) -> Option<f64> {
    c.get(key).and_then(to_finite_number)
}

fn string_at(c: &Map<String, Value>, key: &str) -> Option<String> {
    c.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads a list of strings from an array, or from a comma-separated string.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn dedupe(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
