//! Validation predicates and the failures they report.

use serde_json::Value;
use std::fmt;

use super::pattern::TextPattern;
use crate::coercion::{display_number, to_finite_number};
use crate::errors::FailureCategory;
use crate::formats::{digit_count, parse_time_of_day, DateFormat};

/// JSON value kinds a schema node can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number with no fractional part.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl ValueKind {
    /// Returns the schema name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Returns true if `value` is of this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64()
                || value.is_u64()
                || value.as_f64().is_some_and(|n| n.fract() == 0.0),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String formats checked by [`Predicate::Format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// A real calendar date laid out in the given format.
    Date(DateFormat),
    /// `HH:mm` or `HH:mm:ss`.
    Time,
    /// An `http://` or `https://` link.
    HttpUrl,
}

impl FormatKind {
    fn check(self, input: &str) -> bool {
        match self {
            Self::Date(format) => format.matches(input),
            Self::Time => parse_time_of_day(input).is_some(),
            Self::HttpUrl => is_http_url(input),
        }
    }
}

/// What kind of check failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// A required value or object property is missing.
    Required,
    /// The value has the wrong JSON kind.
    Type(ValueKind),
    /// The value is not one of the allowed options.
    Enum,
    /// A property does not hold its fixed value.
    Const,
    /// Below an inclusive lower bound.
    Minimum(f64),
    /// Above an inclusive upper bound.
    Maximum(f64),
    /// Fewer characters than allowed.
    MinLength(u64),
    /// More characters than allowed.
    MaxLength(u64),
    /// The regular expression did not match.
    Pattern,
    /// The string is not in the expected format.
    Format(FormatKind),
    /// An array holds the same item twice.
    UniqueItems,
    /// None of several alternatives matched.
    AnyOf,
    /// A domain check that carries its own message.
    Custom(FailureCategory),
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureDetail {
    /// What failed.
    pub kind: FailureKind,
    /// Message generated by the check itself, if any.
    pub message: Option<String>,
}

impl FailureDetail {
    /// Creates a failure without a message of its own.
    #[must_use]
    pub const fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a domain failure with a generated message.
    #[must_use]
    pub fn custom(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Custom(category),
            message: Some(message.into()),
        }
    }
}

const MB: f64 = 1024.0 * 1024.0;

/// A single check applied to a value that already has the right kind.
///
/// Every predicate passes values it does not apply to, such as a string
/// handed to a numeric bound, so they can be combined freely.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Inclusive numeric lower bound.
    Minimum(f64),
    /// Inclusive numeric upper bound.
    Maximum(f64),
    /// Minimum number of characters.
    MinLength(u64),
    /// Maximum number of characters.
    MaxLength(u64),
    /// Pattern searched in the string.
    Pattern(TextPattern),
    /// The string must equal one of these.
    OneOf(Vec<String>),
    /// String format.
    Format(FormatKind),
    /// Minimum digit count of a number.
    MinDigits(u32),
    /// Maximum digit count of a number.
    MaxDigits(u32),
    /// Earliest date, compared chronologically under `format`.
    MinDate {
        /// The bound as written in the constraints.
        bound: String,
        /// Layout of both the value and the bound.
        format: DateFormat,
    },
    /// Latest date, compared chronologically under `format`.
    MaxDate {
        /// The bound as written in the constraints.
        bound: String,
        /// Layout of both the value and the bound.
        format: DateFormat,
    },
    /// Earliest time of day.
    MinTime(String),
    /// Latest time of day.
    MaxTime(String),
    /// Seconds since midnight must be a multiple of `step`.
    TimeStep {
        /// Step in seconds.
        step: f64,
        /// Floating-point tolerance.
        tolerance: f64,
    },
    /// The number must be `base + k * step` for some integer `k`.
    StepAlign {
        /// First position.
        base: f64,
        /// Distance between positions.
        step: f64,
        /// Floating-point tolerance.
        tolerance: f64,
    },
    /// File metadata must match one of the accepted extensions or MIME
    /// patterns.
    FileAccept(Vec<String>),
    /// A linked URL's path must match one of the accepted extensions.
    UrlAccept(Vec<String>),
    /// File metadata must not declare more than this many bytes.
    MaxFileBytes(f64),
}

impl Predicate {
    /// Checks `value`, returning the failure if it does not hold.
    pub fn evaluate(&self, value: &Value) -> Result<(), FailureDetail> {
        let ok = match self {
            Self::Minimum(min) => value.as_f64().map_or(true, |n| n >= *min),
            Self::Maximum(max) => value.as_f64().map_or(true, |n| n <= *max),
            Self::MinLength(min) => value.as_str().map_or(true, |s| char_len(s) >= *min),
            Self::MaxLength(max) => value.as_str().map_or(true, |s| char_len(s) <= *max),
            Self::Pattern(pattern) => value.as_str().map_or(true, |s| pattern.is_match(s)),
            Self::OneOf(options) => value.as_str().map_or(true, |s| options.iter().any(|o| o == s)),
            Self::Format(format) => value.as_str().map_or(true, |s| format.check(s)),
            Self::MinDigits(min) => !value.is_number() || digit_count(value) >= *min as usize,
            Self::MaxDigits(max) => !value.is_number() || digit_count(value) <= *max as usize,
            Self::MinDate { bound, format } => date_holds(value, bound, *format, |v, b| v >= b),
            Self::MaxDate { bound, format } => date_holds(value, bound, *format, |v, b| v <= b),
            Self::MinTime(bound) => time_holds(value, bound, |v, b| v >= b),
            Self::MaxTime(bound) => time_holds(value, bound, |v, b| v <= b),
            Self::TimeStep { step, tolerance } => value
                .as_str()
                .and_then(parse_time_of_day)
                .map_or(true, |secs| aligned(f64::from(secs), 0.0, *step, *tolerance)),
            Self::StepAlign {
                base,
                step,
                tolerance,
            } => value
                .as_f64()
                .map_or(true, |n| aligned(n, *base, *step, *tolerance)),
            Self::FileAccept(accepts) => {
                value.as_object().map_or(true, |_| file_matches_accept(value, accepts))
            }
            Self::UrlAccept(accepts) => value.as_str().map_or(true, |s| url_matches_accept(s, accepts)),
            Self::MaxFileBytes(limit) => declared_size(value).map_or(true, |size| size <= *limit),
        };

        if ok {
            Ok(())
        } else {
            Err(self.failure())
        }
    }

    fn failure(&self) -> FailureDetail {
        use FailureCategory as C;

        match self {
            Self::Minimum(min) => FailureDetail::new(FailureKind::Minimum(*min)),
            Self::Maximum(max) => FailureDetail::new(FailureKind::Maximum(*max)),
            Self::MinLength(min) => FailureDetail::new(FailureKind::MinLength(*min)),
            Self::MaxLength(max) => FailureDetail::new(FailureKind::MaxLength(*max)),
            Self::Pattern(_) => FailureDetail::new(FailureKind::Pattern),
            Self::OneOf(_) => FailureDetail::new(FailureKind::Enum),
            Self::Format(format) => FailureDetail::new(FailureKind::Format(*format)),
            Self::MinDigits(min) => FailureDetail::custom(C::Digits, format!("should have ≥ {min} digits")),
            Self::MaxDigits(max) => FailureDetail::custom(C::Digits, format!("should have ≤ {max} digits")),
            Self::MinDate { bound, .. } => FailureDetail::custom(C::DateBound, format!("should be ≥ {bound}")),
            Self::MaxDate { bound, .. } => FailureDetail::custom(C::DateBound, format!("should be ≤ {bound}")),
            Self::MinTime(bound) => FailureDetail::custom(C::TimeBound, format!("should be ≥ {bound}")),
            Self::MaxTime(bound) => FailureDetail::custom(C::TimeBound, format!("should be ≤ {bound}")),
            Self::TimeStep { step, .. } => FailureDetail::custom(
                C::Step,
                format!("should align to {}s steps", display_number(*step)),
            ),
            Self::StepAlign { base, step, .. } => FailureDetail::custom(
                C::Step,
                format!(
                    "should align to step {} starting at {}",
                    display_number(*step),
                    display_number(*base)
                ),
            ),
            Self::FileAccept(_) => FailureDetail::custom(C::FileType, "type not allowed"),
            Self::UrlAccept(_) => FailureDetail::custom(C::FileType, "URL not in allowed formats"),
            Self::MaxFileBytes(limit) => FailureDetail::custom(
                C::FileSize,
                format!("exceeds max size ({} MB)", display_number((limit / MB).round())),
            ),
        }
    }
}

fn char_len(s: &str) -> u64 {
    s.chars().count() as u64
}

fn aligned(value: f64, base: f64, step: f64, tolerance: f64) -> bool {
    if !step.is_finite() || step == 0.0 {
        return true;
    }
    let ratio = (value - base) / step;
    (ratio - ratio.round()).abs() <= tolerance
}

fn date_holds(
    value: &Value,
    bound: &str,
    format: DateFormat,
    holds: impl Fn(chrono::NaiveDate, chrono::NaiveDate) -> bool,
) -> bool {
    let Some(input) = value.as_str().filter(|s| !s.is_empty()) else {
        return true;
    };
    match (format.parse(input), format.parse(bound)) {
        (Some(v), Some(b)) => holds(v, b),
        _ => true,
    }
}

fn time_holds(value: &Value, bound: &str, holds: impl Fn(u32, u32) -> bool) -> bool {
    let Some(input) = value.as_str().filter(|s| !s.is_empty()) else {
        return true;
    };
    match (parse_time_of_day(input), parse_time_of_day(bound)) {
        (Some(v), Some(b)) => holds(v, b),
        _ => true,
    }
}

fn is_http_url(input: &str) -> bool {
    let lowered = input.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme) && lowered.len() > scheme.len())
}

/// Lower-cased, trimmed, non-empty accept patterns.
fn accept_checks(accepts: &[String]) -> impl Iterator<Item = String> + '_ {
    accepts
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
}

fn meta_text(meta: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| meta.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .unwrap_or_default()
        .to_lowercase()
}

/// Matches file metadata `{name|filename, type|contentType}` against accept
/// patterns. An empty accept list allows everything.
#[must_use]
pub fn file_matches_accept(meta: &Value, accepts: &[String]) -> bool {
    let name = meta_text(meta, &["name", "filename"]);
    let mime = meta_text(meta, &["type", "contentType"]);

    let mut checks = accept_checks(accepts).peekable();
    if checks.peek().is_none() {
        return true;
    }
    checks.any(|a| {
        if let Some(family) = a.strip_suffix("/*") {
            mime.starts_with(&format!("{family}/"))
        } else if a.starts_with('.') {
            name.ends_with(&a)
        } else if a.contains('/') {
            mime == a
        } else {
            name.ends_with(&format!(".{a}"))
        }
    })
}

/// Matches a URL's path against accept patterns, by extension only. MIME
/// patterns cannot be checked without fetching and always pass. A URL that
/// does not parse never matches.
#[must_use]
pub fn url_matches_accept(input: &str, accepts: &[String]) -> bool {
    let Ok(url) = url::Url::parse(input) else {
        return false;
    };
    let path = url.path().to_lowercase();

    let mut checks = accept_checks(accepts).peekable();
    if checks.peek().is_none() {
        return true;
    }
    checks.any(|a| {
        if a.ends_with("/*") || (!a.starts_with('.') && a.contains('/')) {
            true
        } else if a.starts_with('.') {
            path.ends_with(&a)
        } else {
            path.ends_with(&format!(".{a}"))
        }
    })
}

fn declared_size(meta: &Value) -> Option<f64> {
    meta.as_object()?;
    meta.get("size").and_then(to_finite_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn formats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_value_kinds() {
        assert!(ValueKind::Integer.matches(&json!(3)));
        assert!(ValueKind::Integer.matches(&json!(3.0)));
        assert!(!ValueKind::Integer.matches(&json!(3.5)));
        assert!(ValueKind::Number.matches(&json!(3.5)));
        assert!(!ValueKind::Number.matches(&json!("3")));
        assert!(ValueKind::Boolean.matches(&json!(false)));
    }

    #[test]
    fn test_bounds_skip_other_kinds() {
        assert!(Predicate::Minimum(5.0).evaluate(&json!("abc")).is_ok());
        assert!(Predicate::MaxLength(1).evaluate(&json!(12345)).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(Predicate::MaxLength(3).evaluate(&json!("äöü")).is_ok());
        assert_eq!(
            Predicate::MinLength(4).evaluate(&json!("äöü")).unwrap_err().kind,
            FailureKind::MinLength(4)
        );
    }

    #[test]
    fn test_digits() {
        let err = Predicate::MaxDigits(3).evaluate(&json!(-1234)).unwrap_err();
        assert_eq!(err.kind, FailureKind::Custom(FailureCategory::Digits));
        assert_eq!(err.message.as_deref(), Some("should have ≤ 3 digits"));
        assert!(Predicate::MaxDigits(3).evaluate(&json!(-12.3)).is_ok());
        assert!(Predicate::MinDigits(2).evaluate(&json!(7)).is_err());
    }

    #[test]
    fn test_date_bounds() {
        let min = Predicate::MinDate {
            bound: "01.01.2020".into(),
            format: DateFormat::DayMonthYearDotted,
        };
        let err = min.evaluate(&json!("15.06.2019")).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("should be ≥ 01.01.2020"));
        assert!(min.evaluate(&json!("15.06.2021")).is_ok());
        assert!(min.evaluate(&json!("garbage")).is_ok());
    }

    #[test]
    fn test_time_bounds_and_step() {
        assert!(Predicate::MinTime("08:00".into()).evaluate(&json!("07:59")).is_err());
        assert!(Predicate::MaxTime("17:00".into()).evaluate(&json!("17:00:00")).is_ok());

        let step = Predicate::TimeStep {
            step: 900.0,
            tolerance: 1e-9,
        };
        assert!(step.evaluate(&json!("08:15")).is_ok());
        let err = step.evaluate(&json!("08:10")).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("should align to 900s steps"));
    }

    #[test]
    fn test_step_align_tolerates_float_noise() {
        let step = Predicate::StepAlign {
            base: 0.0,
            step: 0.1,
            tolerance: 1e-9,
        };
        assert!(step.evaluate(&json!(0.3)).is_ok());
        let err = Predicate::StepAlign {
            base: 1.0,
            step: 2.0,
            tolerance: 1e-9,
        }
        .evaluate(&json!(2))
        .unwrap_err();
        assert_eq!(err.message.as_deref(), Some("should align to step 2 starting at 1"));
    }

    #[test]
    fn test_file_accept() {
        let meta = json!({"name": "Scan.PDF", "type": "application/pdf"});
        assert!(file_matches_accept(&meta, &[]));
        assert!(file_matches_accept(&meta, &formats(&["pdf"])));
        assert!(file_matches_accept(&meta, &formats(&[".pdf"])));
        assert!(file_matches_accept(&meta, &formats(&["application/*"])));
        assert!(file_matches_accept(&meta, &formats(&["application/pdf"])));
        assert!(!file_matches_accept(&meta, &formats(&["image/*", "png"])));

        let fallback = json!({"filename": "photo.jpg", "contentType": "image/jpeg"});
        assert!(file_matches_accept(&fallback, &formats(&["image/*"])));
    }

    #[test]
    fn test_url_accept() {
        assert!(url_matches_accept("https://x.org/a/report.PDF", &formats(&["pdf"])));
        assert!(url_matches_accept("https://x.org/a/report", &formats(&["image/*"])));
        assert!(!url_matches_accept("https://x.org/a/report.doc", &formats(&[".pdf"])));
        assert!(!url_matches_accept("not a url", &[]));
    }

    #[test]
    fn test_max_file_bytes() {
        let limit = Predicate::MaxFileBytes(MB);
        assert!(limit.evaluate(&json!({"size": 1024})).is_ok());
        assert!(limit.evaluate(&json!({"size": "abc"})).is_ok());
        let err = limit.evaluate(&json!({"size": "2000000"})).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("exceeds max size (1 MB)"));
    }

    #[test]
    fn test_http_url_format() {
        assert!(FormatKind::HttpUrl.check("HTTPS://example.org"));
        assert!(!FormatKind::HttpUrl.check("ftp://example.org"));
        assert!(!FormatKind::HttpUrl.check("http://"));
    }
}
