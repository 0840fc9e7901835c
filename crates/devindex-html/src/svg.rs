//! Inline SVG for axis and donut charts.

use std::f64::consts::PI;
use std::fmt::Write;

use devindex_core::format::format_value;
use devindex_types::{AxisChart, ChartStyle, DonutChart, ValueFormat};

use crate::escape_html;

const WIDTH: f64 = 320.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 28.0;

const DONUT_SIZE: f64 = 160.0;
const DONUT_RADIUS: f64 = 60.0;
const DONUT_STROKE: f64 = 24.0;

/// Vertical value-to-pixel mapping.
struct Scale {
    lo: f64,
    hi: f64,
    top: f64,
    bottom: f64,
}

impl Scale {
    fn y(&self, value: f64) -> f64 {
        if self.hi <= self.lo {
            return (self.top + self.bottom) / 2.0;
        }
        self.bottom - (value - self.lo) / (self.hi - self.lo) * (self.bottom - self.top)
    }
}

/// Render a line or bar chart. `plot_height` is the pixel span of the value axis.
pub fn axis_chart(chart: &AxisChart, format: ValueFormat, plot_height: f64) -> String {
    if chart.points.is_empty() {
        return r#"<p class="no-data">No data</p>"#.to_string();
    }

    let height = MARGIN_TOP + plot_height + MARGIN_BOTTOM;
    let left = MARGIN_LEFT;
    let right = WIDTH - MARGIN_RIGHT;
    let bottom = MARGIN_TOP + plot_height;

    let values = chart.points.iter().map(|p| p.value).filter(|v| v.is_finite());
    let ticks = chart.ticks.iter().map(|t| t.value);
    let (lo, hi) = values
        .chain(ticks)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let scale = Scale {
        lo,
        hi,
        top: MARGIN_TOP,
        bottom,
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg id="{id}" class="chart" viewBox="0 0 {WIDTH} {height}" width="{WIDTH}" height="{height}" role="img">"#,
        id = escape_html(&chart.id),
    );

    for tick in &chart.ticks {
        let y = scale.y(tick.value);
        let _ = write!(
            svg,
            r##"<line x1="{left}" y1="{y:.1}" x2="{right}" y2="{y:.1}" stroke="#e0e0e0"/><text x="{lx}" y="{ty:.1}" font-size="10" text-anchor="end" fill="#5f6368">{label}</text>"##,
            lx = left - 6.0,
            ty = y + 3.0,
            label = escape_html(&tick.label),
        );
    }

    if let Some(baseline) = chart.baseline.filter(|b| b.is_finite()) {
        let y = scale.y(baseline);
        let _ = write!(
            svg,
            r#"<line class="baseline" x1="{left}" y1="{y:.1}" x2="{right}" y2="{y:.1}" stroke="{color}" stroke-dasharray="4 3"/>"#,
            color = escape_html(&chart.baseline_color),
        );
    }

    let n = chart.points.len();
    let slot = (right - left) / n as f64;
    let x_at = |i: usize| left + slot * (i as f64 + 0.5);
    let color = escape_html(&chart.color);

    match chart.style {
        ChartStyle::Bar => {
            let zero = scale.y(lo.max(0.0).min(hi));
            for (i, point) in chart.points.iter().enumerate() {
                let y = scale.y(point.value);
                let (top, h) = if y <= zero { (y, zero - y) } else { (zero, y - zero) };
                let _ = write!(
                    svg,
                    r#"<rect x="{x:.1}" y="{top:.1}" width="{w:.1}" height="{h:.1}" fill="{color}"><title>{title}</title></rect>"#,
                    x = x_at(i) - slot * 0.3,
                    w = slot * 0.6,
                    title = point_title(&point.label, point.value, format),
                );
            }
        }
        ChartStyle::Line | ChartStyle::Donut => {
            if !chart.single_point {
                let path: Vec<String> = chart
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("{:.1},{:.1}", x_at(i), scale.y(p.value)))
                    .collect();
                let _ = write!(
                    svg,
                    r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
                    path.join(" ")
                );
            }
            for (i, point) in chart.points.iter().enumerate() {
                let _ = write!(
                    svg,
                    r#"<circle cx="{x:.1}" cy="{y:.1}" r="3.5" fill="{color}"><title>{title}</title></circle>"#,
                    x = x_at(i),
                    y = scale.y(point.value),
                    title = point_title(&point.label, point.value, format),
                );
            }
        }
    }

    for (i, point) in chart.points.iter().enumerate() {
        let _ = write!(
            svg,
            r##"<text x="{x:.1}" y="{y:.1}" font-size="9" text-anchor="middle" fill="#5f6368">{label}</text>"##,
            x = x_at(i),
            y = bottom + 16.0,
            label = escape_html(&point.label),
        );
    }

    svg.push_str("</svg>");
    svg
}

fn point_title(label: &str, value: f64, format: ValueFormat) -> String {
    escape_html(&format!("{label}: {}", format_value(Some(value), format)))
}

/// Render a donut with its legend.
pub fn donut_chart(chart: &DonutChart) -> String {
    if chart.slices.is_empty() || chart.total <= 0.0 {
        return r#"<p class="no-data">No data</p>"#.to_string();
    }

    let center = DONUT_SIZE / 2.0;
    let circumference = 2.0 * PI * DONUT_RADIUS;
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg id="{id}" class="donut" viewBox="0 0 {DONUT_SIZE} {DONUT_SIZE}" width="{DONUT_SIZE}" height="{DONUT_SIZE}" role="img"><g transform="rotate(-90 {center} {center})">"#,
        id = escape_html(&chart.id),
    );

    let mut offset = 0.0;
    let mut legend = String::from(r#"<ul class="legend">"#);
    for slice in &chart.slices {
        let share = slice.value / chart.total;
        let length = share * circumference;
        let color = escape_html(&slice.color);
        let label = escape_html(&slice.label);
        let _ = write!(
            svg,
            r#"<circle cx="{center}" cy="{center}" r="{DONUT_RADIUS}" fill="none" stroke="{color}" stroke-width="{DONUT_STROKE}" stroke-dasharray="{length:.2} {rest:.2}" stroke-dashoffset="{off:.2}"><title>{label}</title></circle>"#,
            rest = circumference - length,
            off = -offset,
        );
        let _ = write!(
            legend,
            r#"<li><span class="swatch" style="background:{color}"></span>{label}: {value} ({pct:.1}%)</li>"#,
            value = format_value(Some(slice.value), ValueFormat::Number),
            pct = share * 100.0,
        );
        offset += length;
    }
    svg.push_str("</g></svg>");
    legend.push_str("</ul>");
    svg + &legend
}
