//! Display strings for values, improvements and weights.

use devindex_math::format_grouped;
use devindex_types::{Improvement, ValueFormat};

pub const NOT_AVAILABLE: &str = "N/A";

/// `"12.5%"` for percentages; grouped digits for numbers, two decimals
/// unless the value is whole.
pub fn format_value(value: Option<f64>, format: ValueFormat) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    match format {
        ValueFormat::Percentage => format!("{}%", format_grouped(value * 100.0, 1)),
        ValueFormat::Number if value.fract() == 0.0 => format_grouped(value, 0),
        ValueFormat::Number => format_grouped(value, 2),
    }
}

/// Signed percentage with one decimal, e.g. `"+16.7%"`.
pub fn format_signed_pct(pct: f64) -> String {
    let text = format_grouped(pct, 1);
    if text.starts_with('-') || text.trim_start_matches(['0', '.', ',']).is_empty() {
        format!("{text}%")
    } else {
        format!("+{text}%")
    }
}

pub fn format_improvement(improvement: &Improvement) -> String {
    match improvement.pct() {
        Some(pct) => format_signed_pct(pct),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Share of the overall index, `"—"` when the metric carries no weight.
pub fn format_weight(global_weight: f64) -> String {
    if global_weight == 0.0 {
        "—".to_string()
    } else {
        format!("{:.1}%", global_weight * 100.0)
    }
}
