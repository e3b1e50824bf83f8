//! Property-based tests for normalization and validation.
//!
//! These tests use proptest to verify invariants over arbitrary JSON:
//! - Normalization is idempotent and keeps only allowed keys
//! - Range-bearing records are ordered
//! - Validation always produces a verdict

use proptest::prelude::*;
use serde_json::{Map, Value};

use crate::constraints::{allowed_keys, keys, normalize_constraints, NormalizedConstraints, SliderMode};
use crate::core::{FieldDefinition, FieldType};
use crate::validation::validate_field_value;

const KNOWN_KEYS: &[&str] = &[
    keys::REQUIRED,
    keys::READONLY,
    keys::HELP_TEXT,
    keys::PLACEHOLDER,
    keys::DEFAULT_VALUE,
    keys::OPTIONS,
    keys::MIN_LENGTH,
    keys::MAX_LENGTH,
    keys::PATTERN,
    keys::TRANSFORM,
    keys::MIN,
    keys::MAX,
    keys::STEP,
    keys::INTEGER_ONLY,
    keys::MIN_DIGITS,
    keys::MAX_DIGITS,
    keys::LEGACY_MAX_DIGITS,
    keys::MIN_DATE,
    keys::MAX_DATE,
    keys::DATE_FORMAT,
    keys::MIN_TIME,
    keys::MAX_TIME,
    keys::ALLOW_MULTIPLE,
    keys::MODE,
    keys::PERCENT,
    keys::MARKS,
    keys::STORAGE_PREFERENCE,
    keys::ALLOWED_FORMATS,
    keys::MAX_SIZE_MB,
    keys::MODALITIES,
    keys::ALLOW_MULTIPLE_FILES,
    "bogus",
];

const INTERESTING_STRINGS: &[&str] = &[
    "linear", "slider", "url", "local", "uppercase", "capitalize", "dd.MM.yyyy", "yyyy-MM",
    "01.01.2020", "31.12.2019", "2021-06", "08:30", "23:59:59", "pdf", ".png", "image/*", "12", "",
];

const EXTREME_NUMBERS: &[f64] = &[
    1e300, -1e300, 1e299, 5e299, 1.8e298, f64::MAX, -f64::MAX, 9.1e15, -9.1e15, 1e-300,
];

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        (-1.0e4f64..1.0e4).prop_map(Value::from),
        prop::num::f64::NORMAL.prop_map(Value::from),
        prop::sample::select(EXTREME_NUMBERS).prop_map(Value::from),
        "[a-zA-Z0-9 .:/*-]{0,10}".prop_map(Value::String),
        prop::sample::select(INTERESTING_STRINGS).prop_map(Value::from),
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("(value|label|name|x)", inner, 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_constraints() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(prop::sample::select(KNOWN_KEYS), arb_json(), 0..10).prop_map(|m| {
        Value::Object(
            m.into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<Map<String, Value>>(),
        )
    })
}

fn arb_field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

proptest! {
    /// Normalizing a normalized record changes nothing.
    #[test]
    fn prop_normalize_is_idempotent(field_type in arb_field_type(), raw in arb_constraints()) {
        let once = normalize_constraints(field_type, &raw);
        let twice = normalize_constraints(field_type, &once.to_json());
        prop_assert_eq!(once, twice);
    }

    /// Normalization accepts any JSON at all.
    #[test]
    fn prop_normalize_is_total(field_type in arb_field_type(), raw in arb_json()) {
        let normalized = normalize_constraints(field_type, &raw);
        prop_assert!(normalized.fits(field_type));
    }

    /// Only keys on the type's allow-list survive.
    #[test]
    fn prop_only_allowed_keys(field_type in arb_field_type(), raw in arb_constraints()) {
        let map = normalize_constraints(field_type, &raw).to_map();
        let allowed = allowed_keys(field_type);
        for key in map.keys() {
            prop_assert!(allowed.contains(&key.as_str()), "{} kept {}", field_type, key);
        }
    }

    /// Bounds are ordered and slider and file invariants hold.
    #[test]
    fn prop_ranges_are_ordered(field_type in arb_field_type(), raw in arb_constraints()) {
        match normalize_constraints(field_type, &raw) {
            NormalizedConstraints::Number(c) => {
                if let (Some(min), Some(max)) = (c.min, c.max) {
                    prop_assert!(min <= max);
                }
                if let (Some(min), Some(max)) = (c.min_digits, c.max_digits) {
                    prop_assert!(min <= max);
                }
            }
            NormalizedConstraints::Text(c) => {
                if let (Some(min), Some(max)) = (c.min_length, c.max_length) {
                    prop_assert!(min <= max);
                }
            }
            NormalizedConstraints::Date(c) => {
                prop_assert_ne!(
                    c.date_format.compare(&c.min_date, &c.max_date),
                    Some(std::cmp::Ordering::Greater)
                );
            }
            NormalizedConstraints::Slider(c) => {
                prop_assert!(c.min < c.max);
                if let SliderMode::Slider { step, marks, .. } = &c.mode {
                    prop_assert!(*step > 0.0);
                    prop_assert!(marks.windows(2).all(|w| w[0].value < w[1].value));
                }
            }
            NormalizedConstraints::File(c) => {
                prop_assert!(c.max_size_mb.is_finite() && c.max_size_mb > 0.0);
            }
            NormalizedConstraints::Checkbox(_)
            | NormalizedConstraints::Choice(_)
            | NormalizedConstraints::Time(_) => {}
        }
    }

    /// Every value gets a verdict, and every failure a message.
    #[test]
    fn prop_validate_is_total(
        field_type in arb_field_type(),
        raw in arb_constraints(),
        value in arb_json(),
    ) {
        let field = FieldDefinition::new(field_type, "Field", vec!["a".into(), "12".into()], &raw);
        let result = validate_field_value(&field, &value);
        prop_assert!(result.is_valid() || result.message.is_some());
        prop_assert_eq!(result.is_valid(), result.category.is_none());
    }
}
