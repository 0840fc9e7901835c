//! # devindex-series
//!
//! **Tier 2 (Series)**
//!
//! Builds chronological per-metric series with the baseline as a synthetic
//! leading point, and classifies trends against that baseline.
//!
//! ## What does NOT belong here
//! * Tick layout (use devindex-axis)
//! * Chart payloads (use devindex-chart)

use std::collections::BTreeMap;

use devindex_math::{change_pct, improvement, reference_of, rolling_mean};
use devindex_types::{
    BASELINE_LABEL, ComparisonReference, Improvement, MagnitudeTier, MetricInput, MetricSeries,
    Period, SeriesPoint, Trend, TrendDirection, TrendPolicy,
};

/// Assemble a series: baseline first (when present), then every recorded
/// period in chronological order. Missing periods stay missing.
pub fn build_series(
    key: &str,
    baseline: Option<f64>,
    periods: &BTreeMap<Period, f64>,
) -> MetricSeries {
    let mut points = Vec::with_capacity(periods.len() + 1);
    if let Some(value) = baseline {
        points.push(SeriesPoint {
            period: Period::Baseline,
            label: BASELINE_LABEL.to_string(),
            value,
        });
    }
    points.extend(periods.iter().map(|(period, value)| SeriesPoint {
        period: *period,
        label: period.label(),
        value: *value,
    }));
    MetricSeries {
        key: key.to_string(),
        points,
    }
}

pub fn series_from_input(key: &str, input: &MetricInput) -> MetricSeries {
    build_series(key, input.baseline, &input.periods)
}

/// Mean of the last `window` period values, baseline excluded.
pub fn rolling_average(series: &MetricSeries, window: Option<usize>) -> Option<f64> {
    let values: Vec<f64> = series.period_points().map(|p| p.value).collect();
    rolling_mean(&values, window)
}

/// Value compared against the baseline.
pub fn reference_value(
    series: &MetricSeries,
    reference: ComparisonReference,
    window: Option<usize>,
) -> Option<f64> {
    let values: Vec<f64> = series.period_points().map(|p| p.value).collect();
    reference_of(&values, reference, window)
}

/// Trend of a series relative to its baseline.
///
/// `None` unless the series has both a baseline and at least one period.
pub fn trend(
    series: &MetricSeries,
    inverse: bool,
    reference: ComparisonReference,
    policy: &TrendPolicy,
    window: Option<usize>,
) -> Option<Trend> {
    let baseline_value = series.baseline()?;
    let reference_value = reference_value(series, reference, window)?;
    let improvement = improvement(reference_value, baseline_value, inverse);
    let (direction, tier) = classify(&improvement, policy);
    Some(Trend {
        change_pct: change_pct(reference_value, baseline_value),
        improvement,
        direction,
        tier,
        reference_value,
        baseline_value,
    })
}

/// Map an improvement onto a direction and a magnitude tier.
pub fn classify(
    improvement: &Improvement,
    policy: &TrendPolicy,
) -> (TrendDirection, MagnitudeTier) {
    let Some(pct) = improvement.pct() else {
        return (TrendDirection::Flat, MagnitudeTier::NotApplicable);
    };

    let direction = if pct > policy.flat_band_pct {
        TrendDirection::Up
    } else if pct < -policy.flat_band_pct {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    let tier = if pct >= policy.significant_pct {
        MagnitudeTier::Significant
    } else if pct >= policy.modest_pct {
        MagnitudeTier::Modest
    } else if pct <= -policy.modest_pct {
        MagnitudeTier::Declining
    } else {
        MagnitudeTier::Neutral
    };

    (direction, tier)
}
