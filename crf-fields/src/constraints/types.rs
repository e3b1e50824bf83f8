//! Normalized, per-type constraint records.
//!
//! Each [`NormalizedConstraints`] variant holds only the constraint fields
//! legal for its field types. Records are produced by the normalizer and
//! serialize back to the camelCase key/value shape form builders use.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use super::keys;
use crate::coercion::DefaultValue;
use crate::core::FieldType;
use crate::formats::DateFormat;

/// Constraints shared by most field types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseConstraints {
    /// Whether a value must be supplied.
    pub required: Option<bool>,
    /// Whether the entry client shows the field read-only.
    pub readonly: Option<bool>,
    /// Help text shown below the field.
    pub help_text: Option<String>,
    /// Placeholder shown in an empty input.
    pub placeholder: Option<String>,
    /// Default value, already coerced to the field type's shape.
    pub default_value: Option<DefaultValue>,
}

impl BaseConstraints {
    fn write(&self, map: &mut Map<String, Value>) {
        put(map, keys::REQUIRED, self.required.map(Value::Bool));
        put(map, keys::READONLY, self.readonly.map(Value::Bool));
        put(map, keys::HELP_TEXT, self.help_text.clone().map(Value::String));
        put(map, keys::PLACEHOLDER, self.placeholder.clone().map(Value::String));
        put(map, keys::DEFAULT_VALUE, self.default_value.as_ref().map(DefaultValue::to_json));
    }
}

/// Case transform applied to text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTransform {
    /// Leave input unchanged.
    None,
    /// Upper-case all characters.
    Uppercase,
    /// Lower-case all characters.
    Lowercase,
    /// Upper-case the first letter of each word.
    Capitalize,
}

impl TextTransform {
    /// Parses a transform name; `None` for anything unrecognised.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "uppercase" => Some(Self::Uppercase),
            "lowercase" => Some(Self::Lowercase),
            "capitalize" => Some(Self::Capitalize),
            _ => None,
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
        }
    }

    /// Applies the transform to entered text.
    #[must_use]
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::None => input.to_string(),
            Self::Uppercase => input.to_uppercase(),
            Self::Lowercase => input.to_lowercase(),
            Self::Capitalize => {
                let mut out = String::with_capacity(input.len());
                let mut at_word_start = true;
                for c in input.chars() {
                    if at_word_start && c.is_alphabetic() {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                    at_word_start = c.is_whitespace();
                }
                out
            }
        }
    }
}

/// Constraints for `text` and `textarea` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextConstraints {
    /// Shared constraints.
    pub base: BaseConstraints,
    /// Minimum number of characters.
    pub min_length: Option<u64>,
    /// Maximum number of characters.
    pub max_length: Option<u64>,
    /// Regular expression the text must match.
    pub pattern: Option<String>,
    /// Case transform.
    pub transform: Option<TextTransform>,
}

/// Constraints for `number` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberConstraints {
    /// Shared constraints.
    pub base: BaseConstraints,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Input step hint for the entry client.
    pub step: Option<f64>,
    /// Whether only integers are accepted.
    pub integer_only: Option<bool>,
    /// Minimum number of digits.
    pub min_digits: Option<u32>,
    /// Maximum number of digits.
    pub max_digits: Option<u32>,
}

/// Constraints for `radio` and `select` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceConstraints {
    /// Shared constraints.
    pub base: BaseConstraints,
    /// Whether several options may be chosen. Always `None` for `select`.
    pub allow_multiple: Option<bool>,
}

/// Constraints for `date` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateConstraints {
    /// Shared constraints.
    pub base: BaseConstraints,
    /// Earliest date in `date_format`, or empty for none.
    pub min_date: String,
    /// Latest date in `date_format`, or empty for none.
    pub max_date: String,
    /// Layout of values and bounds.
    pub date_format: DateFormat,
}

/// Constraints for `time` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeConstraints {
    /// Shared constraints.
    pub base: BaseConstraints,
    /// Earliest time, `HH:mm[:ss]`.
    pub min_time: Option<String>,
    /// Latest time, `HH:mm[:ss]`.
    pub max_time: Option<String>,
    /// Step in seconds.
    pub step: Option<f64>,
}

/// A labelled tick on a point slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    /// Position on the slider.
    pub value: f64,
    /// Label shown at the position.
    pub label: String,
}

/// The two mutually exclusive slider shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderMode {
    /// Discrete points from `min` to `max` every `step`.
    Slider {
        /// Distance between points; always positive.
        step: f64,
        /// Whether this is a 1–100 percentage slider.
        percent: bool,
        /// Labelled ticks, snapped to steps and sorted by value.
        marks: Vec<SliderMark>,
    },
    /// An integer scale with no steps or labels.
    Linear,
}

impl SliderMode {
    /// Returns the wire name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Slider { .. } => "slider",
            Self::Linear => "linear",
        }
    }
}

/// Constraints for `slider` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConstraints {
    /// Shared constraints; never carries a placeholder or default.
    pub base: BaseConstraints,
    /// Lowest position.
    pub min: f64,
    /// Highest position; always greater than `min`.
    pub max: f64,
    /// Point slider or linear scale.
    pub mode: SliderMode,
}

impl Default for SliderConstraints {
    fn default() -> Self {
        Self {
            base: BaseConstraints::default(),
            min: 1.0,
            max: 5.0,
            mode: SliderMode::Slider {
                step: 1.0,
                percent: false,
                marks: Vec::new(),
            },
        }
    }
}

/// Where uploaded files live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoragePreference {
    /// Uploaded from the entry client.
    Local,
    /// Linked by http(s) URL.
    Url,
}

impl StoragePreference {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Url => "url",
        }
    }
}

/// Constraints for `file` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FileConstraints {
    /// Shared constraints; never carries a placeholder or default.
    pub base: BaseConstraints,
    /// Storage preference. Always set by the normalizer; a hand-built
    /// record without one accepts every file shape.
    pub storage_preference: Option<StoragePreference>,
    /// Extensions (`pdf`, `.png`) or MIME patterns (`image/*`), lower-cased.
    pub allowed_formats: Vec<String>,
    /// Size limit in megabytes.
    pub max_size_mb: f64,
    /// Recording modalities, in first-seen order.
    pub modalities: Vec<String>,
    /// Whether several files may be attached.
    pub allow_multiple_files: Option<bool>,
}

impl Default for FileConstraints {
    fn default() -> Self {
        Self {
            base: BaseConstraints::default(),
            storage_preference: None,
            allowed_formats: Vec::new(),
            max_size_mb: 100.0,
            modalities: Vec::new(),
            allow_multiple_files: None,
        }
    }
}

/// A canonical constraint record for one field type.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedConstraints {
    /// `text` / `textarea`
    Text(TextConstraints),
    /// `number`
    Number(NumberConstraints),
    /// `checkbox`
    Checkbox(BaseConstraints),
    /// `radio` / `select`
    Choice(ChoiceConstraints),
    /// `date`
    Date(DateConstraints),
    /// `time`
    Time(TimeConstraints),
    /// `slider`
    Slider(SliderConstraints),
    /// `file`
    File(FileConstraints),
}

impl NormalizedConstraints {
    /// Returns the shared constraints.
    #[must_use]
    pub const fn base(&self) -> &BaseConstraints {
        match self {
            Self::Text(c) => &c.base,
            Self::Number(c) => &c.base,
            Self::Checkbox(c) => c,
            Self::Choice(c) => &c.base,
            Self::Date(c) => &c.base,
            Self::Time(c) => &c.base,
            Self::Slider(c) => &c.base,
            Self::File(c) => &c.base,
        }
    }

    /// Returns true if a value must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.base().required.unwrap_or(false)
    }

    /// Returns the coerced default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.base().default_value.as_ref()
    }

    /// Returns a short name for the record kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Checkbox(_) => "checkbox",
            Self::Choice(_) => "choice",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Slider(_) => "slider",
            Self::File(_) => "file",
        }
    }

    /// Returns true if this record is the right kind for `field_type`.
    #[must_use]
    pub const fn fits(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type),
            (Self::Text(_), FieldType::Text | FieldType::Textarea)
                | (Self::Number(_), FieldType::Number)
                | (Self::Checkbox(_), FieldType::Checkbox)
                | (Self::Choice(_), FieldType::Radio | FieldType::Select)
                | (Self::Date(_), FieldType::Date)
                | (Self::Time(_), FieldType::Time)
                | (Self::Slider(_), FieldType::Slider)
                | (Self::File(_), FieldType::File)
        )
    }

    /// Converts to the camelCase key/value map form builders persist.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        self.base().write(&mut map);

        match self {
            Self::Text(c) => {
                put(&mut map, keys::MIN_LENGTH, c.min_length.map(Value::from));
                put(&mut map, keys::MAX_LENGTH, c.max_length.map(Value::from));
                put(&mut map, keys::PATTERN, c.pattern.clone().map(Value::String));
                put(&mut map, keys::TRANSFORM, c.transform.map(|t| Value::from(t.as_str())));
            }
            Self::Number(c) => {
                put(&mut map, keys::MIN, c.min.map(Value::from));
                put(&mut map, keys::MAX, c.max.map(Value::from));
                put(&mut map, keys::STEP, c.step.map(Value::from));
                put(&mut map, keys::INTEGER_ONLY, c.integer_only.map(Value::Bool));
                put(&mut map, keys::MIN_DIGITS, c.min_digits.map(Value::from));
                put(&mut map, keys::MAX_DIGITS, c.max_digits.map(Value::from));
            }
            Self::Checkbox(_) => {}
            Self::Choice(c) => {
                put(&mut map, keys::ALLOW_MULTIPLE, c.allow_multiple.map(Value::Bool));
            }
            Self::Date(c) => {
                map.insert(keys::MIN_DATE.into(), Value::String(c.min_date.clone()));
                map.insert(keys::MAX_DATE.into(), Value::String(c.max_date.clone()));
                map.insert(keys::DATE_FORMAT.into(), Value::from(c.date_format.pattern()));
            }
            Self::Time(c) => {
                put(&mut map, keys::MIN_TIME, c.min_time.clone().map(Value::String));
                put(&mut map, keys::MAX_TIME, c.max_time.clone().map(Value::String));
                put(&mut map, keys::STEP, c.step.map(Value::from));
            }
            Self::Slider(c) => {
                map.insert(keys::MODE.into(), Value::from(c.mode.as_str()));
                map.insert(keys::MIN.into(), Value::from(c.min));
                map.insert(keys::MAX.into(), Value::from(c.max));
                if let SliderMode::Slider { step, percent, marks } = &c.mode {
                    map.insert(keys::STEP.into(), Value::from(*step));
                    if *percent {
                        map.insert(keys::PERCENT.into(), Value::Bool(true));
                    }
                    if !marks.is_empty() {
                        map.insert(keys::MARKS.into(), serde_json::json!(marks));
                    }
                }
            }
            Self::File(c) => {
                put(
                    &mut map,
                    keys::STORAGE_PREFERENCE,
                    c.storage_preference.map(|p| Value::from(p.as_str())),
                );
                map.insert(keys::ALLOWED_FORMATS.into(), serde_json::json!(c.allowed_formats));
                map.insert(keys::MAX_SIZE_MB.into(), Value::from(c.max_size_mb));
                map.insert(keys::MODALITIES.into(), serde_json::json!(c.modalities));
                put(&mut map, keys::ALLOW_MULTIPLE_FILES, c.allow_multiple_files.map(Value::Bool));
            }
        }

        map
    }

    /// Converts to a JSON object value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.to_map())
    }
}

impl Serialize for NormalizedConstraints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl fmt::Display for NormalizedConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

fn put(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_transform_apply() {
        assert_eq!(TextTransform::Uppercase.apply("abc"), "ABC");
        assert_eq!(TextTransform::Lowercase.apply("AbC"), "abc");
        assert_eq!(TextTransform::Capitalize.apply("john  o'neil smith"), "John  O'neil Smith");
        assert_eq!(TextTransform::None.apply("aB"), "aB");
    }

    #[test]
    fn test_transform_parse() {
        assert_eq!(TextTransform::parse("capitalize"), Some(TextTransform::Capitalize));
        assert_eq!(TextTransform::parse("title"), None);
    }

    #[test]
    fn test_number_to_map() {
        let c = NormalizedConstraints::Number(NumberConstraints {
            base: BaseConstraints {
                required: Some(true),
                ..Default::default()
            },
            min: Some(0.0),
            max_digits: Some(3),
            ..Default::default()
        });
        assert_eq!(
            c.to_json(),
            json!({"required": true, "min": 0.0, "maxDigits": 3})
        );
    }

    #[test]
    fn test_linear_slider_emits_no_step() {
        let c = NormalizedConstraints::Slider(SliderConstraints {
            mode: SliderMode::Linear,
            ..Default::default()
        });
        let map = c.to_map();
        assert_eq!(map.get("mode"), Some(&json!("linear")));
        assert!(!map.contains_key("step"));
        assert!(!map.contains_key("percent"));
        assert!(!map.contains_key("marks"));
    }

    #[test]
    fn test_fits() {
        let text = NormalizedConstraints::Text(TextConstraints::default());
        assert!(text.fits(FieldType::Textarea));
        assert!(!text.fits(FieldType::Number));
        let choice = NormalizedConstraints::Choice(ChoiceConstraints::default());
        assert!(choice.fits(FieldType::Select));
        assert!(choice.fits(FieldType::Radio));
    }
}
