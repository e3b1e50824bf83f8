//! Maps predicate failures to user-facing messages.

use crate::coercion::display_number;
use crate::constraints::NormalizedConstraints;
use crate::core::{FieldDefinition, FieldType, ValidationResult};
use crate::errors::FailureCategory;
use crate::formats::DateFormat;
use crate::schema::{FailureDetail, FailureKind};

/// Message for a required field left empty.
pub const REQUIRED: &str = "This field is required.";
/// Message for a value outside the option list.
pub const INVALID_OPTION: &str = "Choose a valid option.";
/// Message for a failed `pattern`.
pub const PATTERN_MISMATCH: &str = "Does not match required pattern.";
/// Message for a malformed time.
pub const TIME_FORMAT: &str = "Use HH:mm or HH:mm:ss";
/// Message for a malformed file link.
pub const URL_FORMAT: &str = "Use a valid http(s) URL";
/// Message for any other format failure.
pub const BAD_FORMAT: &str = "Bad format";
/// Message for failures without a more specific text.
pub const INVALID_VALUE: &str = "Invalid value.";
/// Message for internal faults.
pub const VALIDATION_ERROR: &str = "Validation error.";

/// Turns the first failure reported for `definition` into a verdict.
#[must_use]
pub fn describe(detail: &FailureDetail, definition: &FieldDefinition) -> ValidationResult {
    use FailureCategory as C;

    match &detail.kind {
        FailureKind::Custom(category) => ValidationResult::invalid(
            *category,
            detail.message.as_deref().unwrap_or(INVALID_VALUE),
        ),
        FailureKind::Format(_) => ValidationResult::invalid(C::Format, format_hint(definition)),
        FailureKind::Enum => ValidationResult::invalid(C::Enum, INVALID_OPTION),
        FailureKind::Type(kind) => ValidationResult::invalid(C::Type, format!("Expected {kind}.")),
        FailureKind::Minimum(min) => {
            ValidationResult::invalid(C::Minimum, format!("Must be ≥ {}.", display_number(*min)))
        }
        FailureKind::Maximum(max) => {
            ValidationResult::invalid(C::Maximum, format!("Must be ≤ {}.", display_number(*max)))
        }
        FailureKind::MinLength(min) => {
            ValidationResult::invalid(C::MinLength, format!("Needs ≥ {min} characters."))
        }
        FailureKind::MaxLength(max) => {
            ValidationResult::invalid(C::MaxLength, format!("Allows ≤ {max} characters."))
        }
        FailureKind::Pattern => ValidationResult::invalid(C::Pattern, PATTERN_MISMATCH),
        FailureKind::Required => ValidationResult::invalid(C::Required, REQUIRED),
        FailureKind::Const | FailureKind::UniqueItems | FailureKind::AnyOf => {
            ValidationResult::invalid(C::Unclassified, INVALID_VALUE)
        }
    }
}

fn format_hint(definition: &FieldDefinition) -> String {
    match definition.field_type {
        FieldType::Time => TIME_FORMAT.to_string(),
        FieldType::Date => {
            let format = match &definition.constraints {
                NormalizedConstraints::Date(c) => c.date_format,
                _ => DateFormat::default(),
            };
            format!("Use format {format}")
        }
        FieldType::File => URL_FORMAT.to_string(),
        _ => BAD_FORMAT.to_string(),
    }
}
