//! Change detection between versions of a form's field list.
//!
//! Entries already collected against a form stay valid across a cosmetic
//! edit (a relabel, new help text) but not across a structural one, so
//! template stores use [`compare_fields`] to decide whether an edit needs a
//! new template version.

mod signature;

pub use signature::{FieldSignature, STRUCTURAL_KEYS};

use serde::Serialize;

use crate::core::FieldDefinition;

/// What changed between two field lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateChange {
    /// The lists are identical.
    Unchanged,
    /// Only display properties differ.
    Cosmetic,
    /// Accepted values, names or field order differ.
    Structural(StructuralChange),
}

impl TemplateChange {
    /// Returns true for structural changes.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

/// Details of a structural change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralChange {
    /// Fields present in both lists whose signature differs.
    pub changed: Vec<String>,
    /// Fields only in the new list.
    pub added: Vec<String>,
    /// Fields only in the old list.
    pub removed: Vec<String>,
    /// Whether the fields common to both lists appear in a different order.
    pub reordered: bool,
}

/// Compares two versions of a field list.
#[must_use]
pub fn compare_fields(old: &[FieldDefinition], new: &[FieldDefinition]) -> TemplateChange {
    let old_sigs: Vec<FieldSignature> = old.iter().map(FieldSignature::of).collect();
    let new_sigs: Vec<FieldSignature> = new.iter().map(FieldSignature::of).collect();

    if old_sigs == new_sigs {
        return if old == new {
            TemplateChange::Unchanged
        } else {
            TemplateChange::Cosmetic
        };
    }

    let find = |sigs: &[FieldSignature], name: &str| sigs.iter().position(|s| s.name == name);

    let mut change = StructuralChange::default();
    for sig in &new_sigs {
        match find(&old_sigs, &sig.name) {
            Some(i) if old_sigs[i] != *sig => change.changed.push(sig.name.clone()),
            Some(_) => {}
            None => change.added.push(sig.name.clone()),
        }
    }
    change.removed = old_sigs
        .iter()
        .filter(|sig| find(&new_sigs, &sig.name).is_none())
        .map(|sig| sig.name.clone())
        .collect();

    let common = |from: &[FieldSignature], other: &[FieldSignature]| -> Vec<String> {
        from.iter()
            .filter(|sig| find(other, &sig.name).is_some())
            .map(|sig| sig.name.clone())
            .collect()
    };
    change.reordered = common(&old_sigs, &new_sigs) != common(&new_sigs, &old_sigs);

    TemplateChange::Structural(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text(name: &str, constraints: serde_json::Value) -> FieldDefinition {
        FieldDefinition::new(FieldType::Text, name.to_uppercase(), vec![], &constraints).with_name(name)
    }

    #[test]
    fn test_unchanged() {
        let fields = vec![text("a", json!({})), text("b", json!({}))];
        assert_eq!(compare_fields(&fields, &fields.clone()), TemplateChange::Unchanged);
    }

    #[test]
    fn test_relabel_is_cosmetic() {
        let old = vec![text("a", json!({"helpText": "old"}))];
        let mut new = vec![text("a", json!({"helpText": "new"}))];
        new[0].label = "Renamed".into();
        assert_eq!(compare_fields(&old, &new), TemplateChange::Cosmetic);
    }

    #[test]
    fn test_constraint_change_is_structural() {
        let old = vec![text("a", json!({"maxLength": 5})), text("b", json!({}))];
        let new = vec![text("a", json!({"maxLength": 6})), text("c", json!({}))];
        assert_eq!(
            compare_fields(&old, &new),
            TemplateChange::Structural(StructuralChange {
                changed: vec!["a".into()],
                added: vec!["c".into()],
                removed: vec!["b".into()],
                reordered: false,
            })
        );
    }

    #[test]
    fn test_reorder_is_structural() {
        let old = vec![text("a", json!({})), text("b", json!({}))];
        let new = vec![text("b", json!({})), text("a", json!({}))];
        let change = compare_fields(&old, &new);
        assert!(change.is_structural());
        assert_eq!(
            change,
            TemplateChange::Structural(StructuralChange {
                reordered: true,
                ..StructuralChange::default()
            })
        );
    }

    #[test]
    fn test_choice_options_are_structural() {
        let old = vec![FieldDefinition::new(FieldType::Select, "Arm", vec!["A".into()], &json!({}))];
        let new = vec![FieldDefinition::new(FieldType::Select, "Arm", vec!["A".into(), "B".into()], &json!({}))];
        assert!(compare_fields(&old, &new).is_structural());
    }
}
