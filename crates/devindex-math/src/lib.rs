//! Deterministic numeric helpers and the improvement calculator.

#![forbid(unsafe_code)]

use devindex_types::{ComparisonReference, Improvement, NaReason};

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Return `part / total` and guard division by zero.
#[must_use]
pub fn safe_share(part: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        0.0
    } else {
        part / total
    }
}

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Format with `decimals` fraction digits and `,` thousands separators.
#[must_use]
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    let is_zero = text.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Mean of the last `window` values; all values when `window` is `None` or 0.
#[must_use]
pub fn rolling_mean(values: &[f64], window: Option<usize>) -> Option<f64> {
    let start = match window {
        Some(n) if n > 0 => values.len().saturating_sub(n),
        _ => 0,
    };
    mean(&values[start..])
}

/// Value compared against the baseline, from chronological period values.
///
/// `Latest` takes the last value; `Average` the rolling mean over `window`.
#[must_use]
pub fn reference_of(
    values: &[f64],
    reference: ComparisonReference,
    window: Option<usize>,
) -> Option<f64> {
    match reference {
        ComparisonReference::Latest => values.last().copied(),
        ComparisonReference::Average => rolling_mean(values, window),
    }
}

/// Raw percentage change of `current` relative to `baseline`.
///
/// `None` when the baseline is zero and the current value is not.
#[must_use]
pub fn change_pct(current: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        return (current == 0.0).then_some(0.0);
    }
    Some((current - baseline) / baseline.abs() * 100.0)
}

/// Percentage improvement of `current` over `baseline`.
///
/// Inverse metrics (lower is better) flip the sign. A zero baseline with a
/// non-zero current value is not meaningful and yields
/// [`NaReason::UndefinedBaseline`]. No rounding happens here.
#[must_use]
pub fn improvement(current: f64, baseline: f64, inverse: bool) -> Improvement {
    match change_pct(current, baseline) {
        None => Improvement::NotApplicable {
            reason: NaReason::UndefinedBaseline,
        },
        Some(raw) => {
            let signed = if inverse { -raw } else { raw };
            // Adding zero folds -0.0 into 0.0.
            Improvement::Measured { pct: signed + 0.0 }
        }
    }
}
