//! # crf-fields
//!
//! Constraint normalization and value validation for eCRF data-collection
//! fields.
//!
//! A form template declares fields of ten types (`text`, `textarea`,
//! `number`, `checkbox`, `radio`, `select`, `date`, `time`, `slider`,
//! `file`), each carrying a free-form constraint record. This crate provides:
//!
//! - **Normalization**: a total, idempotent mapping from any JSON to the
//!   canonical constraint record for a field type
//! - **Schema compilation**: per-field validation schemas built from
//!   normalized constraints, cached by definition fingerprint
//! - **Validation**: verdicts with user-facing messages for single values
//!   and whole entries
//! - **Versioning**: structural comparison of field lists between template
//!   versions
//!
//! ## Quick Start
//!
//! ```rust
//! use crf_fields::prelude::*;
//! use serde_json::json;
//!
//! let raw = json!({"min": "10", "max": 1, "required": "yes", "bogus": true});
//! let constraints = normalize_constraints(FieldType::Number, &raw);
//! assert_eq!(constraints.to_json(), json!({"required": true, "min": 1.0, "max": 10.0}));
//!
//! let field = FieldDefinition::new(FieldType::Number, "Age", vec![], &raw);
//! let result = validate_field_value(&field, &json!(12));
//! assert_eq!(result.message.as_deref(), Some("Must be ≤ 10."));
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod coercion;
pub mod config;
pub mod constraints;
pub mod core;
pub mod errors;
pub mod formats;
pub mod observability;
pub mod schema;
pub mod testing;
pub mod validation;
pub mod versioning;

#[cfg(test)]
mod property_tests;

pub use crate::config::EngineConfig;
pub use crate::constraints::{normalize_constraints, NormalizedConstraints, Normalizer};
pub use crate::core::{FieldDefinition, FieldType, ValidationResult};
pub use crate::errors::{ConfigError, FailureCategory, FieldError};
pub use crate::validation::{validate_field_value, EntryReport, Validator};
pub use crate::versioning::{compare_fields, TemplateChange};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coercion::DefaultValue;
    pub use crate::config::EngineConfig;
    pub use crate::constraints::{
        allowed_keys, normalize_constraints, BaseConstraints, ChoiceConstraints,
        DateConstraints, FileConstraints, NormalizedConstraints, Normalizer,
        NumberConstraints, SliderConstraints, SliderMark, SliderMode, StoragePreference,
        TextConstraints, TextTransform, TimeConstraints,
    };
    pub use crate::core::{FieldDefinition, FieldType, ValidationResult};
    pub use crate::errors::{ConfigError, FailureCategory, FieldError};
    pub use crate::formats::DateFormat;
    pub use crate::schema::{compile, ValidationSchema};
    pub use crate::validation::{
        validate_field_value, EntryReport, FieldReport, SchemaCache, Validator,
    };
    pub use crate::versioning::{compare_fields, StructuralChange, TemplateChange};
}
