//! Field definitions as persisted by form templates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coercion::stringify;
use crate::constraints::{normalize_constraints, NormalizedConstraints, Normalizer};
use crate::core::FieldType;

/// A single field of a form template.
///
/// Serializes to `{type, label, name?, options, constraints}`. Deserializing
/// is lenient: an unknown type falls back to `text`, option objects are
/// reduced to their value, and constraints are always normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFieldDefinition")]
pub struct FieldDefinition {
    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Label shown to data-entry users.
    pub label: String,
    /// Stable machine name, when the template assigns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Choices for `radio` and `select`, in display order.
    pub options: Vec<String>,
    /// Normalized constraints.
    pub constraints: NormalizedConstraints,
}

impl FieldDefinition {
    /// Creates a definition, normalizing `raw_constraints` for `field_type`.
    #[must_use]
    pub fn new(
        field_type: FieldType,
        label: impl Into<String>,
        options: Vec<String>,
        raw_constraints: &Value,
    ) -> Self {
        Self {
            field_type,
            label: label.into(),
            name: None,
            options,
            constraints: normalize_constraints(field_type, raw_constraints),
        }
    }

    /// Creates a definition with the given normalizer.
    #[must_use]
    pub fn normalized_with(
        normalizer: &Normalizer,
        field_type: FieldType,
        label: impl Into<String>,
        options: Vec<String>,
        raw_constraints: &Value,
    ) -> Self {
        Self {
            field_type,
            label: label.into(),
            name: None,
            options,
            constraints: normalizer.normalize(field_type, raw_constraints),
        }
    }

    /// Creates a definition from an already-built constraint record.
    ///
    /// The record is not checked against `field_type` here; compiling a
    /// mismatched definition fails.
    #[must_use]
    pub fn with_constraints(
        field_type: FieldType,
        label: impl Into<String>,
        constraints: NormalizedConstraints,
    ) -> Self {
        Self {
            field_type,
            label: label.into(),
            name: None,
            options: Vec::new(),
            constraints,
        }
    }

    /// Sets the machine name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the choice options.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if a value must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.constraints.is_required()
    }

    /// Returns the name if set, otherwise the label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }
}

#[derive(Deserialize)]
struct RawFieldDefinition {
    #[serde(rename = "type", default)]
    field_type: Value,
    #[serde(default)]
    label: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    options: Value,
    #[serde(default)]
    constraints: Value,
}

impl From<RawFieldDefinition> for FieldDefinition {
    fn from(raw: RawFieldDefinition) -> Self {
        let field_type = raw
            .field_type
            .as_str()
            .map(FieldType::parse_lossy)
            .unwrap_or_default();

        Self {
            field_type,
            label: text_or_empty(&raw.label),
            name: raw.name.as_str().map(str::to_string),
            options: option_list(&raw.options),
            constraints: normalize_constraints(field_type, &raw.constraints),
        }
    }
}

fn text_or_empty(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => stringify(other),
    }
}

/// Reads options from strings, scalars, or `{value|label|name|title}` objects.
fn option_list(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Null | Value::Array(_) => None,
            Value::Object(obj) => ["value", "label", "name", "title"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            scalar => Some(stringify(scalar)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_normalizes() {
        let field = FieldDefinition::new(
            FieldType::Checkbox,
            "Consent",
            vec![],
            &json!({"required": "yes", "placeholder": "x"}),
        );
        assert!(field.is_required());
        assert_eq!(field.constraints.to_json(), json!({"required": true}));
    }

    #[test]
    fn test_serialize_shape() {
        let field = FieldDefinition::new(FieldType::Select, "Arm", vec!["A".into(), "B".into()], &json!({}))
            .with_name("arm");
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "type": "select",
                "label": "Arm",
                "name": "arm",
                "options": ["A", "B"],
                "constraints": {}
            })
        );
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "type": "RADIO",
            "label": 7,
            "options": ["a", {"label": "B"}, {"value": "c", "label": "C"}, 4, null],
            "constraints": {"allowMultiple": 1, "min": 3}
        }))
        .unwrap();

        assert_eq!(field.field_type, FieldType::Radio);
        assert_eq!(field.label, "7");
        assert_eq!(field.name, None);
        assert_eq!(field.options, vec!["a", "B", "c", "4"]);
        assert_eq!(field.constraints.to_json(), json!({"allowMultiple": true}));
    }

    #[test]
    fn test_deserialize_unknown_type_falls_back_to_text() {
        let field: FieldDefinition =
            serde_json::from_value(json!({"type": "signature", "label": "Sign"})).unwrap();
        assert_eq!(field.field_type, FieldType::Text);
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_definition() {
        let field = FieldDefinition::new(
            FieldType::Slider,
            "Pain",
            vec![],
            &json!({"min": 0, "max": 10, "step": 2, "marks": [{"value": 4, "label": "Mid"}]}),
        );
        let back: FieldDefinition =
            serde_json::from_value(serde_json::to_value(&field).unwrap()).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_display_name() {
        let field = FieldDefinition::new(FieldType::Text, "Initials", vec![], &json!({}));
        assert_eq!(field.display_name(), "Initials");
        assert_eq!(field.with_name("initials").display_name(), "initials");
    }
}
