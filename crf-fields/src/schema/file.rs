//! Accepted shapes of a file field value.
//!
//! A file value is one of three records:
//!
//! - a link, `{source: "url", url, filename?, contentType?}`
//! - flat local metadata, `{source: "local", name, size, type?, lastModified?}`
//! - nested local metadata, `{source: "local", file: {name, size, type?, ...}}`

use serde_json::{Map, Value};

use super::predicate::{FailureDetail, FailureKind, FormatKind, Predicate, ValueKind};
use crate::constraints::{FileConstraints, StoragePreference};

const MB: f64 = 1024.0 * 1024.0;

/// One of the three file record layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileShape {
    /// A linked http(s) URL.
    Url,
    /// Local metadata at the top level.
    LocalFlat,
    /// Local metadata under `file`.
    LocalNested,
}

impl FileShape {
    const fn source(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::LocalFlat | Self::LocalNested => "local",
        }
    }
}

/// Compiled checks for a file field.
#[derive(Debug, Clone)]
pub struct FileSchema {
    shapes: Vec<FileShape>,
    url_checks: Vec<Predicate>,
    meta_checks: Vec<Predicate>,
}

impl FileSchema {
    /// Builds the schema for `constraints`, using `default_max_size_mb` when
    /// the record carries no usable limit.
    #[must_use]
    pub fn new(constraints: &FileConstraints, default_max_size_mb: f64) -> Self {
        let shapes = match constraints.storage_preference {
            Some(StoragePreference::Url) => vec![FileShape::Url],
            Some(StoragePreference::Local) => vec![FileShape::LocalFlat, FileShape::LocalNested],
            None => vec![FileShape::Url, FileShape::LocalFlat, FileShape::LocalNested],
        };
        let max_size_mb = if constraints.max_size_mb.is_finite() && constraints.max_size_mb > 0.0 {
            constraints.max_size_mb
        } else {
            default_max_size_mb
        };

        Self {
            shapes,
            url_checks: vec![
                Predicate::Format(FormatKind::HttpUrl),
                Predicate::UrlAccept(constraints.allowed_formats.clone()),
            ],
            meta_checks: vec![
                Predicate::FileAccept(constraints.allowed_formats.clone()),
                Predicate::MaxFileBytes(max_size_mb * MB),
            ],
        }
    }

    /// Returns the accepted shapes, in evaluation order.
    #[must_use]
    pub fn shapes(&self) -> &[FileShape] {
        &self.shapes
    }

    /// Passes if `value` matches any accepted shape.
    ///
    /// When none matches, the failure of the shape the value was evidently
    /// aiming for is reported, falling back to the first accepted shape.
    pub fn evaluate(&self, value: &Value) -> Result<(), FailureDetail> {
        let Some(record) = value.as_object() else {
            return Err(FailureDetail::new(FailureKind::Type(ValueKind::Object)));
        };

        let mut failures = Vec::with_capacity(self.shapes.len());
        for shape in &self.shapes {
            match self.check_shape(*shape, record) {
                Ok(()) => return Ok(()),
                Err(failure) => failures.push((*shape, failure)),
            }
        }

        let intended = intended_shape(record);
        let index = failures
            .iter()
            .position(|(shape, _)| Some(*shape) == intended)
            .unwrap_or(0);
        Err(failures.swap_remove(index).1)
    }

    fn check_shape(&self, shape: FileShape, record: &Map<String, Value>) -> Result<(), FailureDetail> {
        match shape {
            FileShape::Url => {
                require(record, &["source", "url"])?;
                check_source(record, shape)?;
                let Some(url) = record.get("url").filter(|v| v.is_string()) else {
                    return Err(FailureDetail::new(FailureKind::Type(ValueKind::String)));
                };
                for check in &self.url_checks {
                    check.evaluate(url)?;
                }
                optional_string(record, "filename")?;
                optional_string(record, "contentType")
            }
            FileShape::LocalFlat => {
                require(record, &["source", "name", "size"])?;
                check_source(record, shape)?;
                check_meta_properties(record)?;
                self.check_meta(record)
            }
            FileShape::LocalNested => {
                require(record, &["source", "file"])?;
                check_source(record, shape)?;
                let Some(file) = record.get("file").and_then(Value::as_object) else {
                    return Err(FailureDetail::new(FailureKind::Type(ValueKind::Object)));
                };
                require(file, &["name", "size"])?;
                check_meta_properties(file)?;
                self.check_meta(file)
            }
        }
    }

    fn check_meta(&self, meta: &Map<String, Value>) -> Result<(), FailureDetail> {
        let meta = Value::Object(meta.clone());
        self.meta_checks
            .iter()
            .try_for_each(|check| check.evaluate(&meta))
    }
}

/// Guesses which layout a failing record was meant to have.
fn intended_shape(record: &Map<String, Value>) -> Option<FileShape> {
    match record.get("source").and_then(Value::as_str) {
        Some("url") => Some(FileShape::Url),
        Some("local") if record.get("file").is_some_and(Value::is_object) => {
            Some(FileShape::LocalNested)
        }
        Some("local") => Some(FileShape::LocalFlat),
        _ => None,
    }
}

fn require(record: &Map<String, Value>, keys: &[&str]) -> Result<(), FailureDetail> {
    if keys.iter().all(|key| record.contains_key(*key)) {
        Ok(())
    } else {
        Err(FailureDetail::new(FailureKind::Required))
    }
}

fn check_source(record: &Map<String, Value>, shape: FileShape) -> Result<(), FailureDetail> {
    match record.get("source").and_then(Value::as_str) {
        Some(source) if source == shape.source() => Ok(()),
        _ => Err(FailureDetail::new(FailureKind::Const)),
    }
}

fn optional_string(record: &Map<String, Value>, key: &str) -> Result<(), FailureDetail> {
    match record.get(key) {
        Some(v) if !v.is_string() => Err(FailureDetail::new(FailureKind::Type(ValueKind::String))),
        _ => Ok(()),
    }
}

fn is_digit_string(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}

/// Checks the property types of local file metadata.
fn check_meta_properties(meta: &Map<String, Value>) -> Result<(), FailureDetail> {
    optional_string(meta, "name")?;
    optional_string(meta, "type")?;

    if let Some(size) = meta.get("size") {
        let valid = size.as_f64().map_or_else(|| is_digit_string(size), |n| n >= 0.0);
        if !valid {
            return Err(FailureDetail::new(FailureKind::AnyOf));
        }
    }
    if let Some(modified) = meta.get("lastModified") {
        if !(modified.is_number() || is_digit_string(modified)) {
            return Err(FailureDetail::new(FailureKind::AnyOf));
        }
    }
    Ok(())
}
