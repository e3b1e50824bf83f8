//! Testing utilities for code that builds or validates fields.
//!
//! This module provides:
//! - Field fixtures for every field type
//! - File value fixtures for the three file record shapes
//! - Assertions for validation verdicts and normalized constraints

mod assertions;
mod fixtures;

pub use assertions::{
    assert_allowed_keys, assert_category, assert_invalid, assert_invalid_with, assert_valid,
};
pub use fixtures::{
    checkbox_field, date_field, field, file_field, local_file, nested_local_file, number_field,
    radio_field, select_field, slider_field, text_field, textarea_field, time_field, url_file,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldType;
    use crate::errors::FailureCategory;
    use serde_json::json;

    #[test]
    fn test_fixtures_validate() {
        assert_valid(&text_field(json!({"maxLength": 2})), &json!("ab"));
        assert_invalid_with(&text_field(json!({"maxLength": 2})), &json!("abc"), "Allows ≤ 2 characters.");
        assert_valid(&radio_field(&["a", "b"], json!({})), &json!("b"));
        assert_valid(&file_field(json!({})), &local_file("a.pdf", 10, "application/pdf"));
        assert_valid(&file_field(json!({})), &nested_local_file("a.pdf", 10, "application/pdf"));
        assert_category(
            &file_field(json!({"storagePreference": "url"})),
            &url_file("ftp://x.org/a"),
            FailureCategory::Format,
        );
    }

    #[test]
    fn test_allowed_keys_assertion() {
        for field_type in FieldType::ALL {
            assert_allowed_keys(field_type, &json!({"placeholder": "x", "min": 5, "bogus": 1}));
        }
    }

    #[test]
    #[should_panic(expected = "to fail")]
    fn test_assert_invalid_panics_on_valid() {
        assert_invalid(&number_field(json!({})), &json!(1));
    }
}
