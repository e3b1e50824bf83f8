//! Test assertions for validation verdicts and normalized constraints.

use serde_json::Value;

use crate::constraints::{allowed_keys, normalize_constraints};
use crate::core::{FieldDefinition, FieldType, ValidationResult};
use crate::errors::FailureCategory;
use crate::validation::validate_field_value;

/// Asserts that `value` passes `field`.
pub fn assert_valid(field: &FieldDefinition, value: &Value) {
    let result = validate_field_value(field, value);
    assert!(
        result.is_valid(),
        "Expected {value} to pass '{}', got: {:?}",
        field.display_name(),
        result.message
    );
}

/// Asserts that `value` fails `field`, returning the verdict.
pub fn assert_invalid(field: &FieldDefinition, value: &Value) -> ValidationResult {
    let result = validate_field_value(field, value);
    assert!(
        !result.is_valid(),
        "Expected {value} to fail '{}', but it passed",
        field.display_name()
    );
    result
}

/// Asserts that `value` fails `field` with exactly `message`.
pub fn assert_invalid_with(field: &FieldDefinition, value: &Value, message: &str) {
    let result = assert_invalid(field, value);
    assert_eq!(
        result.message_or_empty(),
        message,
        "Unexpected message for {value} on '{}'",
        field.display_name()
    );
}

/// Asserts that `value` fails `field` with the given category.
pub fn assert_category(field: &FieldDefinition, value: &Value, category: FailureCategory) {
    let result = assert_invalid(field, value);
    assert_eq!(
        result.category,
        Some(category),
        "Unexpected category for {value} on '{}'",
        field.display_name()
    );
}

/// Asserts that normalizing `raw` for `field_type` keeps only allowed keys.
pub fn assert_allowed_keys(field_type: FieldType, raw: &Value) {
    let map = normalize_constraints(field_type, raw).to_map();
    let allowed = allowed_keys(field_type);
    let extra: Vec<&String> = map.keys().filter(|k| !allowed.contains(&k.as_str())).collect();
    assert!(
        extra.is_empty(),
        "Keys {extra:?} are not allowed for '{field_type}'"
    );
}
