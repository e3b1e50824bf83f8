//! Field and value fixtures.

use serde_json::{json, Value};

use crate::core::{FieldDefinition, FieldType};

/// Builds a field of `field_type` labelled after its type.
#[must_use]
pub fn field(field_type: FieldType, constraints: Value) -> FieldDefinition {
    FieldDefinition::new(field_type, field_type.as_str(), Vec::new(), &constraints)
}

/// A `text` field.
#[must_use]
pub fn text_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Text, constraints)
}

/// A `textarea` field.
#[must_use]
pub fn textarea_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Textarea, constraints)
}

/// A `number` field.
#[must_use]
pub fn number_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Number, constraints)
}

/// A `checkbox` field.
#[must_use]
pub fn checkbox_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Checkbox, constraints)
}

/// A `radio` field with the given options.
#[must_use]
pub fn radio_field(options: &[&str], constraints: Value) -> FieldDefinition {
    field(FieldType::Radio, constraints).with_options(options.iter().copied())
}

/// A `select` field with the given options.
#[must_use]
pub fn select_field(options: &[&str], constraints: Value) -> FieldDefinition {
    field(FieldType::Select, constraints).with_options(options.iter().copied())
}

/// A `date` field.
#[must_use]
pub fn date_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Date, constraints)
}

/// A `time` field.
#[must_use]
pub fn time_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Time, constraints)
}

/// A `slider` field.
#[must_use]
pub fn slider_field(constraints: Value) -> FieldDefinition {
    field(FieldType::Slider, constraints)
}

/// A `file` field.
#[must_use]
pub fn file_field(constraints: Value) -> FieldDefinition {
    field(FieldType::File, constraints)
}

/// Flat local file metadata.
#[must_use]
pub fn local_file(name: &str, size: u64, mime: &str) -> Value {
    json!({"source": "local", "name": name, "size": size, "type": mime})
}

/// Nested local file metadata.
#[must_use]
pub fn nested_local_file(name: &str, size: u64, mime: &str) -> Value {
    json!({"source": "local", "file": {"name": name, "size": size, "type": mime}})
}

/// A linked file.
#[must_use]
pub fn url_file(url: &str) -> Value {
    json!({"source": "url", "url": url})
}
