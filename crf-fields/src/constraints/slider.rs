//! Slider shape resolution and mark snapping.

use serde_json::{Map, Value};

use super::keys;
use super::types::{SliderMark, SliderMode};
use crate::coercion::{is_truthy, stringify, to_finite_number};

const DEFAULT_MIN: f64 = 1.0;
const DEFAULT_MAX: f64 = 5.0;
const DEFAULT_STEP: f64 = 1.0;
const MARK_TOLERANCE: f64 = 1e-9;
const MAX_SNAP_PASSES: usize = 4;

/// Resolves `(min, max, mode)` from a coerced constraint map.
pub(super) fn resolve(c: &Map<String, Value>) -> (f64, f64, SliderMode) {
    let min = c.get(keys::MIN).and_then(to_finite_number);
    let max = c.get(keys::MAX).and_then(to_finite_number);
    let step = c.get(keys::STEP).and_then(to_finite_number);

    let linear = c
        .get(keys::MODE)
        .and_then(Value::as_str)
        .is_some_and(|m| m.trim().eq_ignore_ascii_case("linear"));

    if linear {
        let (min, max) = widen(
            min.unwrap_or(DEFAULT_MIN).round(),
            max.unwrap_or(DEFAULT_MAX).round(),
        );
        return (min, max, SliderMode::Linear);
    }

    let percent = c.get(keys::PERCENT).is_some_and(is_truthy);
    let (min, max, step) = if percent {
        (1.0, 100.0, step.unwrap_or(DEFAULT_STEP).round().max(1.0))
    } else {
        let (min, max) = widen(min.unwrap_or(DEFAULT_MIN), max.unwrap_or(DEFAULT_MAX));
        (min, max, step.filter(|s| *s > 0.0).unwrap_or(DEFAULT_STEP))
    };

    let marks = c
        .get(keys::MARKS)
        .map(|raw| snap_marks(parse_marks(raw), min, max, step))
        .unwrap_or_default();

    (min, max, SliderMode::Slider { step, percent, marks })
}

/// Returns `(min, max)` with `max > min`. An empty range becomes
/// `[min, min + 1]`, or the next representable value where `+ 1` is lost.
fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        return (min, max);
    }
    let bumped = min + 1.0;
    if bumped > min && bumped.is_finite() {
        return (min, bumped);
    }
    match next_up(min) {
        Some(next) => (min, next),
        None => (next_down(min), min),
    }
}

// `f64::next_up` needs a newer toolchain than the workspace targets.
fn next_up(n: f64) -> Option<f64> {
    let next = if n == 0.0 {
        f64::from_bits(1)
    } else if n > 0.0 {
        f64::from_bits(n.to_bits() + 1)
    } else {
        f64::from_bits(n.to_bits() - 1)
    };
    next.is_finite().then_some(next)
}

fn next_down(n: f64) -> f64 {
    -next_up(-n).unwrap_or(f64::MAX)
}

/// Reads marks from `[{value, label}, ...]`. Entries without a finite value
/// are skipped.
fn parse_marks(raw: &Value) -> Vec<SliderMark> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let value = obj.get("value").and_then(to_finite_number)?;
            let label = match obj.get("label") {
                None | Some(Value::Null) => String::new(),
                Some(v) => stringify(v),
            };
            Some(SliderMark { value, label })
        })
        .collect()
}

/// Snaps each mark to the nearest step position inside `[min, max]`, keeps
/// the first label per position, and sorts by value.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn snap_marks(marks: Vec<SliderMark>, min: f64, max: f64, step: f64) -> Vec<SliderMark> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }
    let last = ((max - min) / step + MARK_TOLERANCE).floor();

    let snap = |value: f64| {
        let k = ((value - min) / step).round().clamp(0.0, last);
        tidy(k.mul_add(step, min))
    };

    let mut out: Vec<SliderMark> = Vec::with_capacity(marks.len());
    for mark in marks {
        let Some(value) = settle(mark.value, &snap) else {
            continue;
        };
        if out.iter().any(|m| (m.value - value).abs() < MARK_TOLERANCE) {
            continue;
        }
        out.push(SliderMark { value, label: mark.label });
    }

    out.sort_by(|a, b| a.value.total_cmp(&b.value));
    out
}

/// Snaps `value` until it stops moving, so snapping a snapped mark is a
/// no-op. Marks that leave the finite range or never settle are dropped.
fn settle(value: f64, snap: impl Fn(f64) -> f64) -> Option<f64> {
    let mut current = snap(value);
    for _ in 0..MAX_SNAP_PASSES {
        if !current.is_finite() {
            return None;
        }
        let next = snap(current);
        if next == current {
            return Some(current);
        }
        current = next;
    }
    None
}

/// Rounds away binary noise such as `0.30000000000000004`. Magnitudes too
/// large to carry that noise are returned as is.
fn tidy(n: f64) -> f64 {
    let scaled = n * 1e10;
    if scaled.abs() < 9e15 {
        scaled.round() / 1e10
    } else {
        n
    }
}
