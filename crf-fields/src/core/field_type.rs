//! The closed set of field types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FieldError;

/// The declared type of a data-collection field.
///
/// Determines which constraint keys are legal and which coercions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// Numeric input.
    Number,
    /// Boolean tick box.
    Checkbox,
    /// Radio group; may allow multiple selections.
    Radio,
    /// Drop-down; always single selection.
    Select,
    /// Date in one of the supported formats.
    Date,
    /// Time of day.
    Time,
    /// Point slider or linear scale.
    Slider,
    /// File upload or file link.
    File,
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Text
    }
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Checkbox,
        Self::Radio,
        Self::Select,
        Self::Date,
        Self::Time,
        Self::Slider,
        Self::File,
    ];

    /// Returns the wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Date => "date",
            Self::Time => "time",
            Self::Slider => "slider",
            Self::File => "file",
        }
    }

    /// Parses a type name, falling back to [`FieldType::Text`] for anything
    /// unrecognised. Matching ignores case and surrounding whitespace.
    #[must_use]
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Returns true for `text` and `textarea`.
    #[must_use]
    pub const fn is_text_like(self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }

    /// Returns true for `radio` and `select`.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Radio | Self::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| FieldError::UnknownFieldType(s.to_string()))
    }
}
