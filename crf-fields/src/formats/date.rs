//! Supported date formats.
//!
//! Each format is a fixed layout of two-digit day/month and four-digit year
//! tokens joined by literal separators. Values are parsed against the same
//! layout as their bounds so comparisons are chronological, not textual.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy)]
enum Token {
    Day,
    Month,
    Year,
    Lit(char),
}

use Token::{Day, Lit, Month, Year};

/// A date format a date field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// `dd.MM.yyyy`
    #[serde(rename = "dd.MM.yyyy")]
    DayMonthYearDotted,
    /// `MM-dd-yyyy`
    #[serde(rename = "MM-dd-yyyy")]
    MonthDayYear,
    /// `dd-MM-yyyy`
    #[serde(rename = "dd-MM-yyyy")]
    DayMonthYear,
    /// `yyyy-MM-dd`
    #[serde(rename = "yyyy-MM-dd")]
    IsoDate,
    /// `MM/yyyy`
    #[serde(rename = "MM/yyyy")]
    MonthYearSlashed,
    /// `MM-yyyy`
    #[serde(rename = "MM-yyyy")]
    MonthYear,
    /// `yyyy/MM`
    #[serde(rename = "yyyy/MM")]
    YearMonthSlashed,
    /// `yyyy-MM`
    #[serde(rename = "yyyy-MM")]
    YearMonth,
    /// `yyyy`
    #[serde(rename = "yyyy")]
    Year,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::DayMonthYearDotted
    }
}

impl DateFormat {
    /// Every supported format, in picker order.
    pub const ALL: [Self; 9] = [
        Self::DayMonthYearDotted,
        Self::MonthDayYear,
        Self::DayMonthYear,
        Self::IsoDate,
        Self::MonthYearSlashed,
        Self::MonthYear,
        Self::YearMonthSlashed,
        Self::YearMonth,
        Self::Year,
    ];

    /// Returns the canonical pattern string, e.g. `dd.MM.yyyy`.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::DayMonthYearDotted => "dd.MM.yyyy",
            Self::MonthDayYear => "MM-dd-yyyy",
            Self::DayMonthYear => "dd-MM-yyyy",
            Self::IsoDate => "yyyy-MM-dd",
            Self::MonthYearSlashed => "MM/yyyy",
            Self::MonthYear => "MM-yyyy",
            Self::YearMonthSlashed => "yyyy/MM",
            Self::YearMonth => "yyyy-MM",
            Self::Year => "yyyy",
        }
    }

    /// Returns a human label for pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DayMonthYearDotted => "Day.Month.Year",
            Self::MonthDayYear => "Month-Day-Year",
            Self::DayMonthYear => "Day-Month-Year",
            Self::IsoDate => "Year-Month-Day",
            Self::MonthYearSlashed => "Month/Year",
            Self::MonthYear => "Month-Year",
            Self::YearMonthSlashed => "Year/Month",
            Self::YearMonth => "Year-Month",
            Self::Year => "Year Only",
        }
    }

    /// Returns a sample value, always rendering 1 August 2025.
    #[must_use]
    pub fn example(self) -> String {
        NaiveDate::from_ymd_opt(2025, 8, 1).map_or_else(String::new, |d| self.format(d))
    }

    /// Looks up a format by pattern string.
    ///
    /// Picker-style uppercase day and year tokens are accepted, so
    /// `DD-MM-YYYY` resolves to `dd-MM-yyyy`.
    #[must_use]
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        let canonical: String = pattern
            .trim()
            .chars()
            .map(|c| match c {
                'D' => 'd',
                'Y' => 'y',
                other => other,
            })
            .collect();
        Self::ALL.into_iter().find(|f| f.pattern() == canonical)
    }

    const fn layout(self) -> &'static [Token] {
        match self {
            Self::DayMonthYearDotted => &[Day, Lit('.'), Month, Lit('.'), Year],
            Self::MonthDayYear => &[Month, Lit('-'), Day, Lit('-'), Year],
            Self::DayMonthYear => &[Day, Lit('-'), Month, Lit('-'), Year],
            Self::IsoDate => &[Year, Lit('-'), Month, Lit('-'), Day],
            Self::MonthYearSlashed => &[Month, Lit('/'), Year],
            Self::MonthYear => &[Month, Lit('-'), Year],
            Self::YearMonthSlashed => &[Year, Lit('/'), Month],
            Self::YearMonth => &[Year, Lit('-'), Month],
            Self::Year => &[Year],
        }
    }

    /// Parses a value laid out in this format.
    ///
    /// Missing day or month components default to the first. Returns `None`
    /// if the text does not follow the layout or names no calendar date.
    #[must_use]
    pub fn parse(self, input: &str) -> Option<NaiveDate> {
        let mut rest = input;
        let (mut day, mut month, mut year) = (1_u32, 1_u32, None);

        for token in self.layout() {
            match token {
                Lit(c) => rest = rest.strip_prefix(*c)?,
                Day => (day, rest) = take_digits(rest, 2)?,
                Month => (month, rest) = take_digits(rest, 2)?,
                Year => {
                    let (y, r) = take_digits(rest, 4)?;
                    year = Some(i32::try_from(y).ok()?);
                    rest = r;
                }
            }
        }

        if !rest.is_empty() {
            return None;
        }
        NaiveDate::from_ymd_opt(year?, month, day)
    }

    /// Returns true if the value is a real date in this format.
    #[must_use]
    pub fn matches(self, input: &str) -> bool {
        self.parse(input).is_some()
    }

    /// Renders a date in this format.
    #[must_use]
    pub fn format(self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(10);
        for token in self.layout() {
            match token {
                Lit(c) => out.push(*c),
                Day => out.push_str(&format!("{:02}", date.day())),
                Month => out.push_str(&format!("{:02}", date.month())),
                Year => out.push_str(&format!("{:04}", date.year())),
            }
        }
        out
    }

    /// Compares two values chronologically under this format.
    ///
    /// Returns `None` if either side does not parse.
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Option<Ordering> {
        Some(self.parse(a)?.cmp(&self.parse(b)?))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

fn take_digits(input: &str, width: usize) -> Option<(u32, &str)> {
    let digits = input.get(..width)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, &input[width..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_format() {
        let d = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();
        assert_eq!(DateFormat::DayMonthYearDotted.parse("15.06.2021"), Some(d));
        assert_eq!(DateFormat::MonthDayYear.parse("06-15-2021"), Some(d));
        assert_eq!(DateFormat::DayMonthYear.parse("15-06-2021"), Some(d));
        assert_eq!(DateFormat::IsoDate.parse("2021-06-15"), Some(d));

        let first = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        assert_eq!(DateFormat::MonthYearSlashed.parse("06/2021"), Some(first));
        assert_eq!(DateFormat::MonthYear.parse("06-2021"), Some(first));
        assert_eq!(DateFormat::YearMonthSlashed.parse("2021/06"), Some(first));
        assert_eq!(DateFormat::YearMonth.parse("2021-06"), Some(first));
        assert_eq!(
            DateFormat::Year.parse("2021"),
            NaiveDate::from_ymd_opt(2021, 1, 1)
        );
    }

    #[test]
    fn test_parse_rejects_bad_layouts() {
        let f = DateFormat::DayMonthYearDotted;
        assert!(f.parse("5.06.2021").is_none());
        assert!(f.parse("15/06/2021").is_none());
        assert!(f.parse("15.06.2021 ").is_none());
        assert!(f.parse("15.06.21").is_none());
        assert!(f.parse("").is_none());
        assert!(f.parse("1５.06.2021").is_none());
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(!DateFormat::DayMonthYearDotted.matches("31.02.2020"));
        assert!(!DateFormat::IsoDate.matches("2020-13-01"));
        assert!(DateFormat::IsoDate.matches("2020-02-29"));
    }

    #[test]
    fn test_from_pattern_accepts_picker_tokens() {
        assert_eq!(DateFormat::from_pattern("DD-MM-YYYY"), Some(DateFormat::DayMonthYear));
        assert_eq!(DateFormat::from_pattern("yyyy-MM-dd"), Some(DateFormat::IsoDate));
        assert_eq!(DateFormat::from_pattern("DD MMM YYYY"), None);
    }

    #[test]
    fn test_compare_is_chronological() {
        let f = DateFormat::DayMonthYearDotted;
        // Textual order would say "01.01.2020" < "15.06.2019".
        assert_eq!(f.compare("01.01.2020", "15.06.2019"), Some(Ordering::Greater));
        assert_eq!(f.compare("bad", "15.06.2019"), None);
    }

    #[test]
    fn test_examples_round_trip() {
        for f in DateFormat::ALL {
            let example = f.example();
            assert!(f.matches(&example), "{f} example {example} should parse");
        }
        assert_eq!(DateFormat::MonthDayYear.example(), "08-01-2025");
    }

    #[test]
    fn test_serde_uses_patterns() {
        let json = serde_json::to_string(&DateFormat::YearMonthSlashed).unwrap();
        assert_eq!(json, "\"yyyy/MM\"");
        let back: DateFormat = serde_json::from_str("\"dd.MM.yyyy\"").unwrap();
        assert_eq!(back, DateFormat::DayMonthYearDotted);
    }
}
