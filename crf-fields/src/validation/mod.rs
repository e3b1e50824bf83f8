//! Validator and error mapper.
//!
//! [`Validator`] short-circuits empty values, compiles (or fetches) the
//! field's schema, and maps the first failing check to a render-ready
//! message and a stable [`crate::errors::FailureCategory`].

mod cache;
mod entry;
pub mod messages;
mod validator;


pub use cache::{fingerprint, SchemaCache};
pub use entry::{EntryReport, FieldReport};
pub use validator::{validate_field_value, Validator};
