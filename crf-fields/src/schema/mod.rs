//! The schema compiler.
//!
//! A [`ValidationSchema`] is an ordered tree of typed [`Predicate`]s built
//! deterministically from a [`crate::core::FieldDefinition`]. Schemas are
//! never persisted; they can be rebuilt from the definition at any time.

mod compile;
mod file;
mod pattern;
mod predicate;

pub use compile::{compile, SchemaNode, ValidationSchema};
pub use file::{FileSchema, FileShape};
pub use pattern::TextPattern;
pub use predicate::{
    file_matches_accept, url_matches_accept, FailureDetail, FailureKind, FormatKind, Predicate,
    ValueKind,
};
