//! Tunable policies with their documented defaults.

use serde::{Deserialize, Serialize};

/// Which value is compared against the baseline for the index and trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonReference {
    /// The most recent period.
    #[default]
    Latest,
    /// The rolling average of the period values.
    Average,
}

/// Thresholds mapping an improvement percentage to a direction and tier.
///
/// | improvement            | direction | tier          |
/// |------------------------|-----------|---------------|
/// | `>= significant_pct`   | up        | significant   |
/// | `>= modest_pct`        | up        | modest        |
/// | `> flat_band_pct`      | up        | neutral       |
/// | within the flat band   | flat      | neutral       |
/// | `< -flat_band_pct`     | down      | neutral       |
/// | `<= -modest_pct`       | down      | declining     |
///
/// Defaults: flat band 1%, modest 5%, significant 20%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPolicy {
    pub flat_band_pct: f64,
    pub modest_pct: f64,
    pub significant_pct: f64,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            flat_band_pct: 1.0,
            modest_pct: 5.0,
            significant_pct: 20.0,
        }
    }
}

/// Upper bound on ticks per axis, whatever the policy asks for.
pub const MAX_TICKS_LIMIT: usize = 50;

/// Tick layout constraints shared by every chart style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPolicy {
    /// Minimum pixels between two tick labels.
    pub min_spacing_px: f64,
    pub min_ticks: usize,
    pub max_ticks: usize,
    /// Span substituted for a flat percentage series (0.01 == 1%).
    pub min_span_percentage: f64,
    pub min_span_integer: f64,
    pub min_span_float: f64,
}

impl Default for AxisPolicy {
    fn default() -> Self {
        Self {
            min_spacing_px: 30.0,
            min_ticks: 3,
            max_ticks: 10,
            min_span_percentage: 0.01,
            min_span_integer: 1.0,
            min_span_float: 0.1,
        }
    }
}

/// Chart geometry and colors handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Vertical pixel span available to the value axis.
    pub axis_span_px: f64,
    pub default_color: String,
    pub baseline_color: String,
    /// Colors cycled through donut slices.
    pub palette: Vec<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            axis_span_px: 160.0,
            default_color: "#4285F4".to_string(),
            baseline_color: "#CCCCCC".to_string(),
            palette: [
                "#4E9896", "#FFCD05", "#3498DB", "#E67E22", "#9B59B6", "#34495E",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}
