//! Compiling field definitions into validation schemas.

use serde_json::Value;
use tracing::debug;

use super::file::FileSchema;
use super::pattern::TextPattern;
use super::predicate::{FailureDetail, FailureKind, FormatKind, Predicate, ValueKind};
use crate::config::EngineConfig;
use crate::constraints::{
    ChoiceConstraints, DateConstraints, NormalizedConstraints, NumberConstraints,
    SliderConstraints, SliderMode, TextConstraints, TimeConstraints,
};
use crate::core::{FieldDefinition, FieldType};
use crate::errors::FieldError;

/// A node of a compiled schema.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A value of one kind, then an ordered list of checks.
    Value {
        /// Required JSON kind.
        kind: ValueKind,
        /// Checks applied once the kind matches.
        predicates: Vec<Predicate>,
    },
    /// An array whose items all match `items`.
    List {
        /// Schema of each item.
        items: Box<SchemaNode>,
        /// Whether duplicates are rejected.
        unique: bool,
    },
    /// A file record in one of the accepted shapes.
    File(FileSchema),
}

impl SchemaNode {
    /// Checks `value`, stopping at the first failure.
    pub fn evaluate(&self, value: &Value) -> Result<(), FailureDetail> {
        match self {
            Self::Value { kind, predicates } => {
                if !kind.matches(value) {
                    return Err(FailureDetail::new(FailureKind::Type(*kind)));
                }
                predicates.iter().try_for_each(|p| p.evaluate(value))
            }
            Self::List { items, unique } => {
                let Some(values) = value.as_array() else {
                    return Err(FailureDetail::new(FailureKind::Type(ValueKind::Array)));
                };
                values.iter().try_for_each(|item| items.evaluate(item))?;
                if *unique && has_duplicates(values) {
                    return Err(FailureDetail::new(FailureKind::UniqueItems));
                }
                Ok(())
            }
            Self::File(schema) => schema.evaluate(value),
        }
    }
}

/// The compiled, stateless checks for one field.
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    field_type: FieldType,
    root: SchemaNode,
}

impl ValidationSchema {
    /// Compiles `definition` with the default configuration.
    pub fn compile(definition: &FieldDefinition) -> Result<Self, FieldError> {
        compile(definition, &EngineConfig::default())
    }

    /// Returns the field type the schema was compiled for.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Checks `value`, reporting the first failure.
    pub fn evaluate(&self, value: &Value) -> Result<(), FailureDetail> {
        self.root.evaluate(value)
    }
}

/// Compiles `definition` into a schema.
///
/// Fails only for definitions that normalization could not have produced:
/// a constraint record for another field type, or a pattern that is not a
/// valid regular expression.
pub fn compile(definition: &FieldDefinition, config: &EngineConfig) -> Result<ValidationSchema, FieldError> {
    let field_type = definition.field_type;
    let constraints = &definition.constraints;

    if !constraints.fits(field_type) {
        return Err(FieldError::constraint_mismatch(field_type, constraints.kind()));
    }

    let root = match constraints {
        NormalizedConstraints::Text(c) => text(c)?,
        NormalizedConstraints::Number(c) => number(c),
        NormalizedConstraints::Checkbox(_) => SchemaNode::Value {
            kind: ValueKind::Boolean,
            predicates: Vec::new(),
        },
        NormalizedConstraints::Choice(c) => choice(field_type, c, &definition.options),
        NormalizedConstraints::Date(c) => date(c),
        NormalizedConstraints::Time(c) => time(c, config),
        NormalizedConstraints::Slider(c) => slider(c, config),
        NormalizedConstraints::File(c) => SchemaNode::File(FileSchema::new(c, config.default_max_size_mb)),
    };

    debug!(field_type = %field_type, label = %definition.label, "Compiled field schema");

    Ok(ValidationSchema { field_type, root })
}

fn text(c: &TextConstraints) -> Result<SchemaNode, FieldError> {
    let mut predicates = Vec::new();
    if let Some(min) = c.min_length {
        predicates.push(Predicate::MinLength(min));
    }
    if let Some(max) = c.max_length {
        predicates.push(Predicate::MaxLength(max));
    }
    if let Some(pattern) = c.pattern.as_deref().filter(|p| !p.is_empty()) {
        predicates.push(Predicate::Pattern(TextPattern::new(pattern)?));
    }
    Ok(SchemaNode::Value {
        kind: ValueKind::String,
        predicates,
    })
}

fn number(c: &NumberConstraints) -> SchemaNode {
    let kind = if c.integer_only == Some(true) {
        ValueKind::Integer
    } else {
        ValueKind::Number
    };

    let mut predicates = bounds(c.min, c.max);
    if let Some(max) = c.max_digits {
        predicates.push(Predicate::MaxDigits(max));
    }
    if let Some(min) = c.min_digits {
        predicates.push(Predicate::MinDigits(min));
    }
    SchemaNode::Value { kind, predicates }
}

fn choice(field_type: FieldType, c: &ChoiceConstraints, options: &[String]) -> SchemaNode {
    // An empty option list still admits the empty selection.
    let options = if options.is_empty() {
        vec![String::new()]
    } else {
        options.to_vec()
    };
    let item = SchemaNode::Value {
        kind: ValueKind::String,
        predicates: vec![Predicate::OneOf(options)],
    };

    if field_type == FieldType::Radio && c.allow_multiple == Some(true) {
        SchemaNode::List {
            items: Box::new(item),
            unique: true,
        }
    } else {
        item
    }
}

fn date(c: &DateConstraints) -> SchemaNode {
    let format = c.date_format;
    let mut predicates = vec![Predicate::Format(FormatKind::Date(format))];
    if !c.min_date.is_empty() {
        predicates.push(Predicate::MinDate {
            bound: c.min_date.clone(),
            format,
        });
    }
    if !c.max_date.is_empty() {
        predicates.push(Predicate::MaxDate {
            bound: c.max_date.clone(),
            format,
        });
    }
    SchemaNode::Value {
        kind: ValueKind::String,
        predicates,
    }
}

fn time(c: &TimeConstraints, config: &EngineConfig) -> SchemaNode {
    let mut predicates = vec![Predicate::Format(FormatKind::Time)];
    if let Some(min) = c.min_time.as_ref().filter(|t| !t.is_empty()) {
        predicates.push(Predicate::MinTime(min.clone()));
    }
    if let Some(max) = c.max_time.as_ref().filter(|t| !t.is_empty()) {
        predicates.push(Predicate::MaxTime(max.clone()));
    }
    if let Some(step) = c.step.filter(|s| s.is_finite() && *s != 0.0) {
        predicates.push(Predicate::TimeStep {
            step,
            tolerance: config.step_tolerance,
        });
    }
    SchemaNode::Value {
        kind: ValueKind::String,
        predicates,
    }
}

fn slider(c: &SliderConstraints, config: &EngineConfig) -> SchemaNode {
    match &c.mode {
        SliderMode::Slider { step, .. } => {
            let step = if step.is_finite() && *step > 0.0 { *step } else { 1.0 };
            let mut predicates = bounds(Some(c.min), Some(c.max));
            predicates.push(Predicate::StepAlign {
                base: c.min,
                step,
                tolerance: config.step_tolerance,
            });
            SchemaNode::Value {
                kind: ValueKind::Number,
                predicates,
            }
        }
        SliderMode::Linear => SchemaNode::Value {
            kind: ValueKind::Integer,
            predicates: bounds(Some(c.min.round()), Some(c.max.round())),
        },
    }
}

/// Upper bound first, so a value failing both reports the maximum.
fn bounds(min: Option<f64>, max: Option<f64>) -> Vec<Predicate> {
    max.map(Predicate::Maximum)
        .into_iter()
        .chain(min.map(Predicate::Minimum))
        .collect()
}

fn has_duplicates(values: &[Value]) -> bool {
    values
        .iter()
        .enumerate()
        .any(|(i, v)| values[..i].contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{BaseConstraints, TextConstraints};
    use serde_json::json;

    fn field(field_type: FieldType, constraints: Value) -> FieldDefinition {
        FieldDefinition::new(field_type, "Field", vec![], &constraints)
    }

    #[test]
    fn test_mismatched_constraints_fail() {
        let definition = FieldDefinition::with_constraints(
            FieldType::Number,
            "Age",
            NormalizedConstraints::Checkbox(BaseConstraints::default()),
        );
        let err = ValidationSchema::compile(&definition).unwrap_err();
        assert!(matches!(err, FieldError::ConstraintMismatch { field_type: FieldType::Number, .. }));
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let definition = FieldDefinition::with_constraints(
            FieldType::Text,
            "Code",
            NormalizedConstraints::Text(TextConstraints {
                pattern: Some("([a-z".into()),
                ..TextConstraints::default()
            }),
        );
        let err = ValidationSchema::compile(&definition).unwrap_err();
        assert!(matches!(err, FieldError::InvalidPattern { .. }));
    }

    #[test]
    fn test_integer_only_number() {
        let schema = ValidationSchema::compile(&field(FieldType::Number, json!({"integerOnly": true}))).unwrap();
        assert!(schema.evaluate(&json!(4)).is_ok());
        assert_eq!(
            schema.evaluate(&json!(4.5)).unwrap_err().kind,
            FailureKind::Type(ValueKind::Integer)
        );
    }

    #[test]
    fn test_multi_radio_is_a_list() {
        let definition = field(FieldType::Radio, json!({"allowMultiple": true})).with_options(["a", "b"]);
        let schema = ValidationSchema::compile(&definition).unwrap();
        assert!(matches!(schema.root(), SchemaNode::List { unique: true, .. }));
        assert!(schema.evaluate(&json!(["a", "b"])).is_ok());
        assert_eq!(schema.evaluate(&json!(["a", "c"])).unwrap_err().kind, FailureKind::Enum);
        assert_eq!(schema.evaluate(&json!(["a", "a"])).unwrap_err().kind, FailureKind::UniqueItems);
        assert_eq!(
            schema.evaluate(&json!("a")).unwrap_err().kind,
            FailureKind::Type(ValueKind::Array)
        );
    }

    #[test]
    fn test_choice_without_options_admits_empty() {
        let schema = ValidationSchema::compile(&field(FieldType::Select, json!({}))).unwrap();
        assert!(schema.evaluate(&json!("")).is_ok());
        assert_eq!(schema.evaluate(&json!("x")).unwrap_err().kind, FailureKind::Enum);
    }

    #[test]
    fn test_empty_date_bounds_add_no_checks() {
        let schema = ValidationSchema::compile(&field(FieldType::Date, json!({}))).unwrap();
        let SchemaNode::Value { predicates, .. } = schema.root() else {
            panic!("expected a value node");
        };
        assert_eq!(predicates.len(), 1);
    }

    #[test]
    fn test_linear_slider_is_integer() {
        let schema = ValidationSchema::compile(&field(FieldType::Slider, json!({"mode": "linear", "min": 0, "max": 10}))).unwrap();
        assert!(schema.evaluate(&json!(7)).is_ok());
        assert_eq!(
            schema.evaluate(&json!(7.5)).unwrap_err().kind,
            FailureKind::Type(ValueKind::Integer)
        );
        assert_eq!(schema.evaluate(&json!(11)).unwrap_err().kind, FailureKind::Maximum(10.0));
    }

    #[test]
    fn test_point_slider_step_alignment() {
        let schema = ValidationSchema::compile(&field(
            FieldType::Slider,
            json!({"mode": "slider", "min": 0, "max": 10, "step": 2.5}),
        ))
        .unwrap();
        assert!(schema.evaluate(&json!(5)).is_ok());
        assert!(schema.evaluate(&json!(6)).is_err());
        assert_eq!(schema.evaluate(&json!(-1)).unwrap_err().kind, FailureKind::Minimum(0.0));
    }
}
