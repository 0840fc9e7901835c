//! # devindex-axis
//!
//! **Tier 2 (Axis Scaling)**
//!
//! One tick layout policy shared by every chart style.
//!
//! ## Steps
//!
//! | format     | candidate steps                                  | beyond the ladder          |
//! |------------|--------------------------------------------------|----------------------------|
//! | percentage | 1%, 2%, 5%, 10%, 20%, 25%, 50%                   | naive rounded up to 100%   |
//! | integer    | 1, 2, 5, 10, 20, 25, 50, 100, 200, 250, 500      | naive rounded up to 100    |
//! | float      | 1×, 2×, 5× the naive step's power of ten         | 1× the next power of ten   |
//!
//! The smallest candidate at or above the naive step wins.

#![forbid(unsafe_code)]

use devindex_math::{format_grouped, round_f64};
use devindex_types::{AxisFormat, AxisPolicy, MAX_TICKS_LIMIT, Tick};

const PERCENT_STEPS: [f64; 7] = [0.01, 0.02, 0.05, 0.10, 0.20, 0.25, 0.50];
const INTEGER_STEPS: [f64; 11] = [
    1.0, 2.0, 5.0, 10.0, 20.0, 25.0, 50.0, 100.0, 200.0, 250.0, 500.0,
];

/// Relative slack for comparisons against step multiples.
const EPS: f64 = 1e-9;

/// 2^52: beyond this an f64 no longer holds every fraction digit.
const EXACT_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Number of ticks the pixel span can hold, within policy bounds.
///
/// Integer axes never ask for more ticks than there are integers in range.
/// The result never exceeds [`MAX_TICKS_LIMIT`].
pub fn target_count(
    min: f64,
    max: f64,
    format: AxisFormat,
    span_px: f64,
    policy: &AxisPolicy,
) -> usize {
    let by_space = if policy.min_spacing_px > 0.0 {
        (span_px / policy.min_spacing_px).floor()
    } else {
        f64::INFINITY
    };
    // `as` saturates; NaN becomes 0.
    let mut count = (by_space as usize)
        .max(policy.min_ticks)
        .min(policy.max_ticks)
        .min(MAX_TICKS_LIMIT);
    if format == AxisFormat::Integer {
        let integers = (max.floor() - min.ceil() + 1.0).max(0.0);
        count = count.min(integers as usize);
    }
    count.max(2)
}

/// Smallest friendly step at or above `naive`.
pub fn nice_step(naive: f64, format: AxisFormat) -> f64 {
    match format {
        AxisFormat::Percentage => ladder_step(&PERCENT_STEPS, naive, 1.0),
        AxisFormat::Integer => ladder_step(&INTEGER_STEPS, naive, 100.0),
        AxisFormat::Float => {
            let magnitude = 10f64.powf(naive.log10().floor());
            [1.0, 2.0, 5.0]
                .into_iter()
                .map(|m| m * magnitude)
                .find(|step| *step >= naive * (1.0 - EPS))
                .unwrap_or(10.0 * magnitude)
        }
    }
}

fn ladder_step(ladder: &[f64], naive: f64, round_to: f64) -> f64 {
    ladder
        .iter()
        .copied()
        .find(|step| *step >= naive * (1.0 - EPS))
        .unwrap_or_else(|| (naive / round_to).ceil() * round_to)
}

fn min_span(format: AxisFormat, policy: &AxisPolicy) -> f64 {
    match format {
        AxisFormat::Percentage => policy.min_span_percentage,
        AxisFormat::Integer => policy.min_span_integer,
        AxisFormat::Float => policy.min_span_float,
    }
}

/// A chosen step with its ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub step: f64,
    pub ticks: Vec<Tick>,
}

/// Choose ticks covering `[min, max]`.
///
/// The first tick is the smallest step multiple at or above `min`. Ticks
/// continue while at or below `max`; when `max` is not reached one more tick
/// is appended. Non-finite bounds yield no ticks.
pub fn choose_ticks(
    min: f64,
    max: f64,
    format: AxisFormat,
    span_px: f64,
    policy: &AxisPolicy,
) -> Vec<Tick> {
    layout(min, max, format, span_px, policy)
        .map(|l| l.ticks)
        .unwrap_or_default()
}

/// Like [`choose_ticks`] but also reports the step. `None` for non-finite bounds.
pub fn layout(
    min: f64,
    max: f64,
    format: AxisFormat,
    span_px: f64,
    policy: &AxisPolicy,
) -> Option<AxisLayout> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let (lo, mut hi) = if min <= max { (min, max) } else { (max, min) };
    if hi - lo <= 0.0 {
        let span = min_span(format, policy);
        hi = lo + if span > 0.0 && span.is_finite() { span } else { 1.0 };
    }

    let count = target_count(lo, hi, format, span_px, policy);
    let naive = (hi - lo) / (count - 1) as f64;
    let step = nice_step(naive, format);
    let ticks = tick_values(lo, hi, step, count.saturating_add(2))
        .into_iter()
        .map(|value| Tick {
            value,
            label: format_tick(value, step, format),
        })
        .collect();
    Some(AxisLayout { step, ticks })
}

fn tick_values(lo: f64, hi: f64, step: f64, limit: usize) -> Vec<f64> {
    let first = (lo / step - EPS).ceil();
    let tolerance = step * EPS;
    let decimals = step_decimals(step);
    let mut out: Vec<f64> = Vec::new();

    for i in 0..limit {
        if out.last().is_some_and(|last| *last >= hi - tolerance) {
            break;
        }
        let value = snap((first + i as f64) * step, decimals);
        if out.last().is_some_and(|last| value <= *last) {
            break;
        }
        out.push(value);
    }
    out
}

/// Strip representation error from a step multiple, at most down to the
/// precision an f64 keeps at this magnitude. Also folds -0.0.
fn snap(value: f64, step_decimals: usize) -> f64 {
    let fits = |decimals: usize| value.abs() * 10f64.powi(decimals as i32) < EXACT_LIMIT;
    let mut decimals = step_decimals + 6;
    while decimals > step_decimals && !fits(decimals) {
        decimals -= 1;
    }
    if fits(decimals) {
        round_f64(value, decimals as u32) + 0.0
    } else {
        value + 0.0
    }
}

fn step_decimals(step: f64) -> usize {
    if step >= 1.0 || step <= 0.0 || !step.is_finite() {
        return 0;
    }
    (-(step.log10() + EPS).floor()).max(0.0) as usize
}

/// Label for a tick value on an axis with the given step.
pub fn format_tick(value: f64, step: f64, format: AxisFormat) -> String {
    match format {
        AxisFormat::Percentage => {
            let decimals = if step < 0.01 { 1 } else { 0 };
            format!("{}%", format_grouped(value * 100.0, decimals))
        }
        AxisFormat::Integer => format_grouped(value.round(), 0),
        AxisFormat::Float => format_grouped(value, step_decimals(step)),
    }
}
