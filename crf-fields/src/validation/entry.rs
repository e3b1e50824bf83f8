//! Per-entry validation reports.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::ValidationResult;

/// The verdict for one field of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// Field name, or its label when it has none.
    pub name: String,
    /// The verdict.
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Verdicts for every field of an entry, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    fields: Vec<FieldReport>,
}

impl EntryReport {
    pub(crate) fn push(&mut self, name: impl Into<String>, result: ValidationResult) {
        self.fields.push(FieldReport {
            name: name.into(),
            result,
        });
    }

    /// Returns true if every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.result.is_valid())
    }

    /// Returns the per-field verdicts.
    #[must_use]
    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    /// Returns the verdict for the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidationResult> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.result)
    }

    /// Returns `name -> message` for every failed field.
    #[must_use]
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter(|f| !f.result.is_valid())
            .map(|f| (f.name.clone(), f.result.message_or_empty().to_string()))
            .collect()
    }

    /// Returns the number of failed fields.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.result.is_valid()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureCategory;

    #[test]
    fn test_report_collects_errors() {
        let mut report = EntryReport::default();
        report.push("age", ValidationResult::ok());
        report.push("dose", ValidationResult::invalid(FailureCategory::Maximum, "Must be ≤ 10."));

        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors().get("dose").map(String::as_str), Some("Must be ≤ 10."));
        assert!(report.get("age").is_some_and(ValidationResult::is_valid));
        assert!(report.get("missing").is_none());
    }

    #[test]
    fn test_empty_report_is_valid() {
        assert!(EntryReport::default().is_valid());
    }

    #[test]
    fn test_serializes_flat() {
        let mut report = EntryReport::default();
        report.push("age", ValidationResult::ok());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({"fields": [{"name": "age", "valid": true}]})
        );
    }
}
