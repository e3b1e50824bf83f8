//! Constraint normalization.
//!
//! This module provides:
//! - Per-type constraint records ([`NormalizedConstraints`])
//! - The total, idempotent [`Normalizer`]
//! - Constraint key names and allow-lists

pub mod keys;
mod normalize;
mod slider;
mod types;


pub use keys::allowed_keys;
pub use normalize::{normalize_constraints, Normalizer};
pub use slider::snap_marks;
pub use types::{
    BaseConstraints, ChoiceConstraints, DateConstraints, FileConstraints, NormalizedConstraints,
    NumberConstraints, SliderConstraints, SliderMark, SliderMode, StoragePreference,
    TextConstraints, TextTransform, TimeConstraints,
};
