//! # devindex-chart
//!
//! **Tier 3 (Render Adapter)**
//!
//! Structural mapping from series and ticks to [`ChartPayload`]. No numeric
//! decisions are made here; tick layout comes from devindex-axis.

use std::fmt::Write;

use devindex_types::{
    AxisChart, AxisFormat, ChartPayload, ChartPoint, ChartStyle, Distribution, DonutChart,
    DonutSlice, MetricSeries, Tick,
};

/// Presentation options for one axis chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub id: String,
    pub axis: AxisFormat,
    pub color: String,
    pub baseline_color: String,
    /// Colors cycled through donut slices.
    pub palette: Vec<String>,
}

/// DOM-safe chart id, distinct for distinct keys.
///
/// Lowercase ASCII alphanumerics are kept and `_` becomes `-`, so `q_bugs`
/// maps to `chart-q-bugs`. Any other character is written as `_<hex>_` of its
/// code point, which keeps `q-bugs` and `Q_Bugs` apart from `q_bugs`.
pub fn chart_id(prefix: &str, key: &str) -> String {
    if key.is_empty() {
        return prefix.to_string();
    }
    let mut id = String::with_capacity(prefix.len() + key.len() + 1);
    id.push_str(prefix);
    id.push('-');
    for ch in key.chars() {
        match ch {
            'a'..='z' | '0'..='9' => id.push(ch),
            '_' => id.push('-'),
            other => {
                let _ = write!(id, "_{:x}_", u32::from(other));
            }
        }
    }
    id
}

fn palette_color(palette: &[String], index: usize, fallback: &str) -> String {
    if palette.is_empty() {
        fallback.to_string()
    } else {
        palette[index % palette.len()].clone()
    }
}

/// Map a series onto the payload of the requested style.
///
/// Line and bar charts keep every point including the baseline; the donut
/// style turns period points into slices.
pub fn render_series(
    series: &MetricSeries,
    ticks: Vec<Tick>,
    style: ChartStyle,
    options: &ChartOptions,
) -> ChartPayload {
    match style {
        ChartStyle::Line | ChartStyle::Bar => {
            let points: Vec<ChartPoint> = series
                .points
                .iter()
                .map(|p| ChartPoint {
                    label: p.label.clone(),
                    value: p.value,
                })
                .collect();
            ChartPayload::Axis(AxisChart {
                id: options.id.clone(),
                style,
                axis: options.axis,
                single_point: points.len() == 1,
                points,
                ticks,
                baseline: series.baseline(),
                color: options.color.clone(),
                baseline_color: options.baseline_color.clone(),
            })
        }
        ChartStyle::Donut => {
            let slices = series
                .period_points()
                .map(|p| (p.label.as_str(), p.value))
                .collect::<Vec<_>>();
            ChartPayload::Donut(build_donut(
                options.id.clone(),
                series.key.clone(),
                slices,
                &options.palette,
                &options.color,
            ))
        }
    }
}

/// Donut chart for a categorical distribution.
pub fn donut(distribution: &Distribution, palette: &[String]) -> DonutChart {
    let fallback = palette.first().map(String::as_str).unwrap_or("#CCCCCC");
    build_donut(
        chart_id("donut", &distribution.name),
        distribution.name.clone(),
        distribution
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.value))
            .collect(),
        palette,
        fallback,
    )
}

/// Negative and non-finite values have no slice.
fn build_donut(
    id: String,
    title: String,
    entries: Vec<(&str, f64)>,
    palette: &[String],
    fallback: &str,
) -> DonutChart {
    let slices: Vec<DonutSlice> = entries
        .into_iter()
        .filter(|(_, v)| v.is_finite() && *v >= 0.0)
        .enumerate()
        .map(|(i, (label, value))| DonutSlice {
            label: label.to_string(),
            value,
            color: palette_color(palette, i, fallback),
        })
        .collect();
    let total = slices.iter().map(|s| s.value).sum();
    DonutChart {
        id,
        title,
        slices,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_id_is_dom_safe() {
        assert_eq!(chart_id("chart", "q_bugs"), "chart-q-bugs");
        assert_eq!(chart_id("donut", "survey_tools"), "donut-survey-tools");
        assert_eq!(chart_id("donut", "Tools!"), "donut-_54_ools_21_");
        assert_eq!(chart_id("chart", ""), "chart");
    }

    #[test]
    fn chart_id_keeps_similar_keys_apart() {
        let ids = ["q_bugs", "q-bugs", "Q_Bugs", "q bugs", "q__bugs"].map(|k| chart_id("chart", k));
        assert_eq!(ids[1], "chart-q_2d_bugs");
        assert_eq!(ids[2], "chart-_51_-_42_ugs");
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
            assert!(
                a.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
            );
        }
    }

    #[test]
    fn palette_cycles() {
        let palette = vec!["#1".to_string(), "#2".to_string()];
        assert_eq!(palette_color(&palette, 3, "#x"), "#2");
        assert_eq!(palette_color(&[], 3, "#x"), "#x");
    }
}
