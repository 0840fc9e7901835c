//! Range checks for the tunable policies.

use devindex_types::{AxisPolicy, ChartSettings, MAX_TICKS_LIMIT, TrendPolicy};

use crate::ConfigError;

fn invalid(policy: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidPolicy {
        policy,
        reason: reason.into(),
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Tick bounds must be ordered and capped; spacing and spans positive.
pub fn validate_axis(axis: &AxisPolicy) -> Result<(), ConfigError> {
    if axis.max_ticks < 2 || axis.max_ticks > MAX_TICKS_LIMIT {
        return Err(invalid(
            "axis",
            format!(
                "max_ticks {} must be between 2 and {MAX_TICKS_LIMIT}",
                axis.max_ticks
            ),
        ));
    }
    if axis.min_ticks > axis.max_ticks {
        return Err(invalid(
            "axis",
            format!(
                "min_ticks {} exceeds max_ticks {}",
                axis.min_ticks, axis.max_ticks
            ),
        ));
    }
    if !is_positive(axis.min_spacing_px) {
        return Err(invalid(
            "axis",
            format!("min_spacing_px {} must be positive", axis.min_spacing_px),
        ));
    }
    for (name, span) in [
        ("min_span_percentage", axis.min_span_percentage),
        ("min_span_integer", axis.min_span_integer),
        ("min_span_float", axis.min_span_float),
    ] {
        if !is_positive(span) {
            return Err(invalid("axis", format!("{name} {span} must be positive")));
        }
    }
    Ok(())
}

/// Requires `0 <= flat_band_pct <= modest_pct <= significant_pct`.
pub fn validate_trend(trend: &TrendPolicy) -> Result<(), ConfigError> {
    let TrendPolicy {
        flat_band_pct,
        modest_pct,
        significant_pct,
    } = *trend;
    let finite = [flat_band_pct, modest_pct, significant_pct]
        .iter()
        .all(|v| v.is_finite());
    if !finite || flat_band_pct < 0.0 || flat_band_pct > modest_pct || modest_pct > significant_pct
    {
        return Err(invalid(
            "trend",
            format!(
                "thresholds must satisfy 0 <= flat_band_pct ({flat_band_pct}) <= modest_pct ({modest_pct}) <= significant_pct ({significant_pct})"
            ),
        ));
    }
    Ok(())
}

pub fn validate_chart(chart: &ChartSettings) -> Result<(), ConfigError> {
    if !is_positive(chart.axis_span_px) {
        return Err(invalid(
            "chart",
            format!("axis_span_px {} must be positive", chart.axis_span_px),
        ));
    }
    Ok(())
}
