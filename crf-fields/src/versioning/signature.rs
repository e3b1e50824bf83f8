//! Structural signatures of fields.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constraints::keys;
use crate::core::{FieldDefinition, FieldType};

/// Constraint keys that change what values a field accepts.
pub const STRUCTURAL_KEYS: &[&str] = &[
    keys::REQUIRED,
    keys::PATTERN,
    keys::MIN,
    keys::MAX,
    keys::MIN_LENGTH,
    keys::MAX_LENGTH,
    keys::STEP,
    keys::ALLOW_MULTIPLE,
    keys::INTEGER_ONLY,
    keys::MIN_DIGITS,
    keys::MAX_DIGITS,
    keys::DATE_FORMAT,
    keys::MIN_DATE,
    keys::MAX_DATE,
    keys::MIN_TIME,
    keys::MAX_TIME,
    keys::MODE,
    keys::PERCENT,
    keys::STORAGE_PREFERENCE,
    keys::ALLOWED_FORMATS,
    keys::MAX_SIZE_MB,
];

/// The minimal, order-stable shape of a field.
///
/// Two fields with equal signatures accept exactly the same values under
/// the same name; labels, help text and other display properties are left
/// out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSignature {
    /// Field name, falling back to the label.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Structural constraints, sorted by key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, Value>,
    /// Options, for choice fields only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSignature {
    /// Builds the signature of `field`.
    #[must_use]
    pub fn of(field: &FieldDefinition) -> Self {
        let constraints = field
            .constraints
            .to_map()
            .into_iter()
            .filter(|(key, _)| STRUCTURAL_KEYS.contains(&key.as_str()))
            .collect();

        let options = field
            .field_type
            .is_choice()
            .then(|| field.options.iter().map(|o| o.trim().to_string()).collect());

        Self {
            name: field.display_name().trim().to_string(),
            field_type: field.field_type,
            constraints,
            options,
        }
    }
}
