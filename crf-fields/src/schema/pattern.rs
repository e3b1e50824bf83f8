//! Text `pattern` constraints with browser regular-expression semantics.
//!
//! Form builders author patterns for JavaScript, where `\d`, `\w` and `\b`
//! only know ASCII. Patterns are rewritten to those ASCII classes before
//! compiling. Anything the linear-time engine accepts runs there; lookaround
//! and backreferences fall back to a backtracking engine.

use crate::errors::FieldError;

const WORD_CHARS: &str = "A-Za-z0-9_";

const LOOKAROUND_BOUNDARY: &str =
    "(?:(?<=[A-Za-z0-9_])(?![A-Za-z0-9_])|(?<![A-Za-z0-9_])(?=[A-Za-z0-9_]))";
const LOOKAROUND_NON_BOUNDARY: &str =
    "(?:(?<=[A-Za-z0-9_])(?=[A-Za-z0-9_])|(?<![A-Za-z0-9_])(?![A-Za-z0-9_]))";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    Linear,
    Backtracking,
}

/// A compiled text pattern.
#[derive(Debug, Clone)]
pub enum TextPattern {
    /// Compiled by `regex`.
    Linear(regex::Regex),
    /// Compiled by `fancy-regex`, for lookaround and backreferences.
    Backtracking(fancy_regex::Regex),
}

impl TextPattern {
    /// Compiles `source`.
    pub fn new(source: &str) -> Result<Self, FieldError> {
        if let Ok(regex) = regex::Regex::new(&translate(source, Engine::Linear)) {
            return Ok(Self::Linear(regex));
        }
        fancy_regex::Regex::new(&translate(source, Engine::Backtracking))
            .map(Self::Backtracking)
            .map_err(|e| FieldError::invalid_pattern(source, e.to_string()))
    }

    /// Returns true if the pattern matches anywhere in `input`.
    ///
    /// A backtracking match that runs out of budget counts as no match.
    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        match self {
            Self::Linear(regex) => regex.is_match(input),
            Self::Backtracking(regex) => regex.is_match(input).unwrap_or(false),
        }
    }

    /// Returns true if the pattern needed the backtracking engine.
    #[must_use]
    pub const fn is_backtracking(&self) -> bool {
        matches!(self, Self::Backtracking(_))
    }
}

fn translate(source: &str, engine: Engine) -> String {
    let mut out = String::with_capacity(source.len() + 8);
    let mut chars = source.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push('\\');
                    break;
                };
                match escaped {
                    'd' if in_class => out.push_str("0-9"),
                    'd' => out.push_str("[0-9]"),
                    'D' => out.push_str("[^0-9]"),
                    'w' if in_class => out.push_str(WORD_CHARS),
                    'w' => {
                        out.push('[');
                        out.push_str(WORD_CHARS);
                        out.push(']');
                    }
                    'W' => {
                        out.push_str("[^");
                        out.push_str(WORD_CHARS);
                        out.push(']');
                    }
                    // Backspace inside a class.
                    'b' if in_class => out.push_str(r"\x08"),
                    'b' => out.push_str(match engine {
                        Engine::Linear => r"(?-u:\b)",
                        Engine::Backtracking => LOOKAROUND_BOUNDARY,
                    }),
                    'B' => out.push_str(match engine {
                        Engine::Linear => r"(?-u:\B)",
                        Engine::Backtracking => LOOKAROUND_NON_BOUNDARY,
                    }),
                    '/' => out.push('/'),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            '[' if in_class => out.push_str(r"\["),
            '[' => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            other => out.push(other),
        }
    }

    out
}
