//! The verdict returned for a single `(field, value)` pair.

use serde::{Deserialize, Serialize};

use crate::errors::FailureCategory;

/// Outcome of validating one value against one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the value is acceptable.
    pub valid: bool,
    /// Render-ready message for invalid values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Stable classification for invalid values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FailureCategory>,
}

impl ValidationResult {
    /// Creates a passing result.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            category: None,
        }
    }

    /// Creates a failing result.
    #[must_use]
    pub fn invalid(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            category: Some(category),
        }
    }

    /// Returns true if the value was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the message, or an empty string when valid.
    #[must_use]
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_serializes_without_message() {
        let json = serde_json::to_value(ValidationResult::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"valid": true}));
    }

    #[test]
    fn test_invalid_serialization() {
        let result = ValidationResult::invalid(FailureCategory::Required, "This field is required.");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": false,
                "message": "This field is required.",
                "category": "required"
            })
        );
        assert_eq!(result.message_or_empty(), "This field is required.");
    }
}
