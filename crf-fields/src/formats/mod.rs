//! Format helpers shared by the normalizer and the schema compiler.
//!
//! - [`DateFormat`]: the closed set of supported date layouts
//! - time-of-day parsing
//! - digit counting

mod date;
mod digits;
mod time;

pub use date::DateFormat;
pub use digits::digit_count;
pub use time::{is_time_of_day, parse_time_of_day};
