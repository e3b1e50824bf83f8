//! Error types for the field engine.
//!
//! Normalization never fails and validation always produces a verdict, so
//! the types here cover two distinct things: internal faults raised while
//! compiling a schema or loading configuration, and the stable
//! classification attached to every failed validation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::core::FieldType;

/// Internal faults of the engine.
///
/// These never reach callers of [`crate::validate_field_value`]: the
/// validator boundary downgrades them into a generic invalid verdict.
#[derive(Debug, Clone, Error)]
pub enum FieldError {
    /// The text `pattern` constraint is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },

    /// A hand-built definition carries constraints for another field type.
    #[error("Constraint record for '{found}' cannot be used with a '{field_type}' field")]
    ConstraintMismatch {
        /// The declared field type.
        field_type: FieldType,
        /// The field type the constraint record belongs to.
        found: String,
    },

    /// Strict parsing of a field type name failed.
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FieldError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates a constraint mismatch error.
    #[must_use]
    pub fn constraint_mismatch(field_type: FieldType, found: impl Into<String>) -> Self {
        Self::ConstraintMismatch {
            field_type,
            found: found.into(),
        }
    }

    /// Converts to a dictionary representation for structured logs.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::InvalidPattern { pattern, reason } => {
                map.insert("type".to_string(), serde_json::json!("InvalidPattern"));
                map.insert("pattern".to_string(), serde_json::json!(pattern));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::ConstraintMismatch { field_type, found } => {
                map.insert("type".to_string(), serde_json::json!("ConstraintMismatch"));
                map.insert("field_type".to_string(), serde_json::json!(field_type.as_str()));
                map.insert("found".to_string(), serde_json::json!(found));
            }
            Self::UnknownFieldType(name) => {
                map.insert("type".to_string(), serde_json::json!("UnknownFieldType"));
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::Serialization(reason) => {
                map.insert("type".to_string(), serde_json::json!("Serialization"));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised while loading an [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config document is not valid JSON for the config shape.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A config value is out of its allowed range.
    #[error("Invalid config value for '{key}': {reason}")]
    Invalid {
        /// The config key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Stable classification of a failed validation.
///
/// UIs key translations and styling on [`FailureCategory::code`], so codes
/// are never renamed once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// A required value is missing.
    Required,
    /// The value has the wrong JSON type.
    Type,
    /// The value is not one of the field's options.
    Enum,
    /// Below the inclusive minimum.
    Minimum,
    /// Above the inclusive maximum.
    Maximum,
    /// Too few characters.
    MinLength,
    /// Too many characters.
    MaxLength,
    /// The text does not match the declared pattern.
    Pattern,
    /// Wrong date, time or URL format.
    Format,
    /// Too few or too many digits.
    Digits,
    /// Outside the allowed date range.
    DateBound,
    /// Outside the allowed time range.
    TimeBound,
    /// Not aligned to the declared step.
    Step,
    /// File or URL type not in the allowed formats.
    FileType,
    /// File larger than the allowed size.
    FileSize,
    /// Any other failure.
    Unclassified,
    /// The engine itself failed.
    Internal,
}

impl FailureCategory {
    /// Returns the stable code for this category.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => codes::REQUIRED,
            Self::Type => codes::TYPE,
            Self::Enum => codes::ENUM,
            Self::Minimum => codes::MINIMUM,
            Self::Maximum => codes::MAXIMUM,
            Self::MinLength => codes::MIN_LENGTH,
            Self::MaxLength => codes::MAX_LENGTH,
            Self::Pattern => codes::PATTERN,
            Self::Format => codes::FORMAT,
            Self::Digits => codes::DIGITS,
            Self::DateBound => codes::DATE_BOUND,
            Self::TimeBound => codes::TIME_BOUND,
            Self::Step => codes::STEP,
            Self::FileType => codes::FILE_TYPE,
            Self::FileSize => codes::FILE_SIZE,
            Self::Unclassified => codes::UNCLASSIFIED,
            Self::Internal => codes::INTERNAL,
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Stable failure codes.
pub mod codes {
    /// Required value missing.
    pub const REQUIRED: &str = "FIELD-REQUIRED";
    /// Wrong value type.
    pub const TYPE: &str = "FIELD-TYPE";
    /// Not a valid option.
    pub const ENUM: &str = "FIELD-ENUM";
    /// Below minimum.
    pub const MINIMUM: &str = "FIELD-MIN";
    /// Above maximum.
    pub const MAXIMUM: &str = "FIELD-MAX";
    /// Too short.
    pub const MIN_LENGTH: &str = "FIELD-MIN-LENGTH";
    /// Too long.
    pub const MAX_LENGTH: &str = "FIELD-MAX-LENGTH";
    /// Pattern mismatch.
    pub const PATTERN: &str = "FIELD-PATTERN";
    /// Format mismatch.
    pub const FORMAT: &str = "FIELD-FORMAT";
    /// Digit count out of bounds.
    pub const DIGITS: &str = "FIELD-DIGITS";
    /// Date out of range.
    pub const DATE_BOUND: &str = "FIELD-DATE-RANGE";
    /// Time out of range.
    pub const TIME_BOUND: &str = "FIELD-TIME-RANGE";
    /// Step misalignment.
    pub const STEP: &str = "FIELD-STEP";
    /// Disallowed file type.
    pub const FILE_TYPE: &str = "FIELD-FILE-TYPE";
    /// File too large.
    pub const FILE_SIZE: &str = "FIELD-FILE-SIZE";
    /// Unclassified failure.
    pub const UNCLASSIFIED: &str = "FIELD-INVALID";
    /// Engine fault.
    pub const INTERNAL: &str = "FIELD-INTERNAL";
}
