//! The validator boundary.
//!
//! Validation never fails from the caller's point of view: every value gets
//! a definite verdict, and internal faults are logged and reported as a
//! generic invalid result.

use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::cache::SchemaCache;
use super::entry::EntryReport;
use super::messages::{self, describe};
use crate::config::EngineConfig;
use crate::core::{FieldDefinition, ValidationResult};
use crate::errors::{FailureCategory, FieldError};

static NULL: Value = Value::Null;

/// Validates values against field definitions, caching compiled schemas.
#[derive(Debug)]
pub struct Validator {
    config: EngineConfig,
    cache: SchemaCache,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Validator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let cache = SchemaCache::new(config.schema_cache_capacity);
        Self { config, cache }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the schema cache.
    #[must_use]
    pub const fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Validates one value.
    ///
    /// Empty values (`null`, `""`, `[]`) pass unless the field is required.
    /// Otherwise the first failing check decides the message.
    #[must_use]
    pub fn validate(&self, definition: &FieldDefinition, value: &Value) -> ValidationResult {
        if is_empty(value) {
            return if definition.is_required() {
                ValidationResult::invalid(FailureCategory::Required, messages::REQUIRED)
            } else {
                ValidationResult::ok()
            };
        }

        contain(definition, || {
            let schema = self.cache.get_or_compile(definition, &self.config)?;
            Ok(match schema.evaluate(value) {
                Ok(()) => ValidationResult::ok(),
                Err(detail) => describe(&detail, definition),
            })
        })
    }

    /// Validates an entry given as a `name -> value` object.
    ///
    /// Fields are looked up by name, falling back to their label; missing
    /// keys validate as absent. Anything other than an object is treated as
    /// an empty entry.
    #[must_use]
    pub fn validate_entry(&self, fields: &[FieldDefinition], values: &Value) -> EntryReport {
        let mut report = EntryReport::default();
        for field in fields {
            let name = field.display_name();
            let value = values.get(name).unwrap_or(&NULL);
            report.push(name, self.validate(field, value));
        }

        debug!(
            fields = fields.len(),
            errors = report.error_count(),
            "Validated entry"
        );
        report
    }
}

/// Validates `value` against `definition` with the default configuration.
///
/// Compiled schemas are shared process-wide through a default
/// [`Validator`].
///
/// # Examples
///
/// ```
/// use crf_fields::{validate_field_value, FieldDefinition, FieldType};
/// use serde_json::json;
///
/// let field = FieldDefinition::new(FieldType::Number, "Dose", vec![], &json!({"maxDigits": 3}));
/// assert!(validate_field_value(&field, &json!(123)).is_valid());
/// assert!(!validate_field_value(&field, &json!(1234)).is_valid());
/// ```
#[must_use]
pub fn validate_field_value(definition: &FieldDefinition, value: &Value) -> ValidationResult {
    static DEFAULT: OnceLock<Validator> = OnceLock::new();
    DEFAULT.get_or_init(Validator::default).validate(definition, value)
}

/// Runs `check`, turning errors and panics into a generic invalid verdict.
fn contain(
    definition: &FieldDefinition,
    check: impl FnOnce() -> Result<ValidationResult, FieldError>,
) -> ValidationResult {
    let fault = match catch_unwind(AssertUnwindSafe(check)) {
        Ok(Ok(result)) => return result,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            format!("panicked: {reason}")
        }
    };

    warn!(
        field_type = %definition.field_type,
        field = %definition.display_name(),
        error = %fault,
        "Validation fault reported as generic error"
    );
    ValidationResult::invalid(FailureCategory::Internal, messages::VALIDATION_ERROR)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
