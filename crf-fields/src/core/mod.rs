//! Core field types: the type enumeration, field definitions and verdicts.

mod definition;
mod field_type;
mod result;

pub use definition::FieldDefinition;
pub use field_type::FieldType;
pub use result::ValidationResult;
