//! Constraint key names and per-type allow-lists.

use crate::core::FieldType;

/// `required`
pub const REQUIRED: &str = "required";
/// `readonly`
pub const READONLY: &str = "readonly";
/// `helpText`
pub const HELP_TEXT: &str = "helpText";
/// `placeholder`
pub const PLACEHOLDER: &str = "placeholder";
/// `defaultValue`
pub const DEFAULT_VALUE: &str = "defaultValue";
/// `options` (field-level, never kept as a constraint)
pub const OPTIONS: &str = "options";
/// `minLength`
pub const MIN_LENGTH: &str = "minLength";
/// `maxLength`
pub const MAX_LENGTH: &str = "maxLength";
/// `pattern`
pub const PATTERN: &str = "pattern";
/// `transform`
pub const TRANSFORM: &str = "transform";
/// `min`
pub const MIN: &str = "min";
/// `max`
pub const MAX: &str = "max";
/// `step`
pub const STEP: &str = "step";
/// `integerOnly`
pub const INTEGER_ONLY: &str = "integerOnly";
/// `minDigits`
pub const MIN_DIGITS: &str = "minDigits";
/// `maxDigits`
pub const MAX_DIGITS: &str = "maxDigits";
/// `maxLengthDigits`, the legacy single digit limit
pub const LEGACY_MAX_DIGITS: &str = "maxLengthDigits";
/// `minDate`
pub const MIN_DATE: &str = "minDate";
/// `maxDate`
pub const MAX_DATE: &str = "maxDate";
/// `dateFormat`
pub const DATE_FORMAT: &str = "dateFormat";
/// `minTime`
pub const MIN_TIME: &str = "minTime";
/// `maxTime`
pub const MAX_TIME: &str = "maxTime";
/// `allowMultiple`
pub const ALLOW_MULTIPLE: &str = "allowMultiple";
/// `mode`
pub const MODE: &str = "mode";
/// `percent`
pub const PERCENT: &str = "percent";
/// `marks`
pub const MARKS: &str = "marks";
/// `storagePreference`
pub const STORAGE_PREFERENCE: &str = "storagePreference";
/// `allowedFormats`
pub const ALLOWED_FORMATS: &str = "allowedFormats";
/// `maxSizeMB`
pub const MAX_SIZE_MB: &str = "maxSizeMB";
/// `modalities`
pub const MODALITIES: &str = "modalities";
/// `allowMultipleFiles`
pub const ALLOW_MULTIPLE_FILES: &str = "allowMultipleFiles";

/// Keys coerced to strict booleans wherever they appear.
pub const BOOLEAN_KEYS: &[&str] = &[
    REQUIRED,
    READONLY,
    ALLOW_MULTIPLE,
    INTEGER_ONLY,
    PERCENT,
    ALLOW_MULTIPLE_FILES,
];

/// Keys coerced to finite numbers wherever they appear.
pub const NUMERIC_KEYS: &[&str] = &[
    MIN,
    MAX,
    STEP,
    MIN_LENGTH,
    MAX_LENGTH,
    MIN_DIGITS,
    MAX_DIGITS,
    LEGACY_MAX_DIGITS,
    MAX_SIZE_MB,
];

const TEXT: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT, PLACEHOLDER, DEFAULT_VALUE,
    MIN_LENGTH, MAX_LENGTH, PATTERN, TRANSFORM,
];

const NUMBER: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT, PLACEHOLDER, DEFAULT_VALUE,
    MIN, MAX, STEP, INTEGER_ONLY, MIN_DIGITS, MAX_DIGITS,
];

const CHECKBOX: &[&str] = &[REQUIRED, READONLY, HELP_TEXT, DEFAULT_VALUE];

const RADIO: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT, PLACEHOLDER, DEFAULT_VALUE,
    ALLOW_MULTIPLE,
];

const SELECT: &[&str] = &[REQUIRED, READONLY, HELP_TEXT, PLACEHOLDER, DEFAULT_VALUE];

const DATE: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT, PLACEHOLDER, DEFAULT_VALUE,
    MIN_DATE, MAX_DATE, DATE_FORMAT,
];

const TIME: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT, PLACEHOLDER, DEFAULT_VALUE,
    MIN_TIME, MAX_TIME, STEP,
];

const SLIDER: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT,
    MODE, MIN, MAX, STEP, PERCENT, MARKS,
];

const FILE: &[&str] = &[
    REQUIRED, READONLY, HELP_TEXT,
    STORAGE_PREFERENCE, ALLOWED_FORMATS, MAX_SIZE_MB, MODALITIES, ALLOW_MULTIPLE_FILES,
];

/// Returns the keys a normalized record of `field_type` may contain.
#[must_use]
pub const fn allowed_keys(field_type: FieldType) -> &'static [&'static str] {
    match field_type {
        FieldType::Text | FieldType::Textarea => TEXT,
        FieldType::Number => NUMBER,
        FieldType::Checkbox => CHECKBOX,
        FieldType::Radio => RADIO,
        FieldType::Select => SELECT,
        FieldType::Date => DATE,
        FieldType::Time => TIME,
        FieldType::Slider => SLIDER,
        FieldType::File => FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_never_allows_multiple() {
        assert!(!allowed_keys(FieldType::Select).contains(&ALLOW_MULTIPLE));
        assert!(allowed_keys(FieldType::Radio).contains(&ALLOW_MULTIPLE));
    }

    #[test]
    fn test_checkbox_has_no_placeholder() {
        assert!(!allowed_keys(FieldType::Checkbox).contains(&PLACEHOLDER));
    }

    #[test]
    fn test_slider_and_file_have_no_default() {
        assert!(!allowed_keys(FieldType::Slider).contains(&DEFAULT_VALUE));
        assert!(!allowed_keys(FieldType::File).contains(&DEFAULT_VALUE));
        assert!(!allowed_keys(FieldType::Slider).contains(&PLACEHOLDER));
    }
}
