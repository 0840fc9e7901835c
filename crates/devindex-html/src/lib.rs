//! # devindex-html
//!
//! **Tier 3 (Formatting Adapter)**
//!
//! Single-responsibility HTML renderer for `ReportReceipt`. The output is one
//! self-contained file: inline CSS, inline SVG charts and the receipt embedded
//! as JSON.

mod svg;

use std::fmt::Write;

use devindex_core::format::{
    format_improvement, format_signed_pct, format_value, format_weight,
};
use devindex_types::{
    ChartPayload, ComparisonReference, MagnitudeTier, MetricRow, ReportReceipt, Trend,
    TrendDirection,
};
use time::OffsetDateTime;
use time::macros::format_description;

/// Vertical pixel span used when the receipt does not say otherwise.
pub const DEFAULT_PLOT_HEIGHT: f64 = 160.0;

/// Render a self-contained HTML report for a receipt.
pub fn render(receipt: &ReportReceipt) -> String {
    render_with_height(receipt, DEFAULT_PLOT_HEIGHT)
}

/// Render with an explicit chart plot height in pixels.
pub fn render_with_height(receipt: &ReportReceipt, plot_height: f64) -> String {
    const TEMPLATE: &str = include_str!("templates/report.html");

    let tool = format!("{} {}", receipt.tool.name, receipt.tool.version);
    let integrity = format!(
        "<code>{}:{}</code>",
        escape_html(&receipt.integrity.algo),
        escape_html(&receipt.integrity.hash)
    );

    fill(
        TEMPLATE,
        &[
            ("TITLE", escape_html(&receipt.title)),
            ("SUBTITLE", escape_html(&receipt.subtitle)),
            ("OVERALL_INDEX", format_signed_pct(receipt.overall_index)),
            ("REFERENCE", reference_label(receipt.reference).to_string()),
            ("SUMMARY_ROWS", build_summary_rows(receipt)),
            ("WARNINGS", build_warnings(receipt)),
            ("CATEGORIES", build_categories(receipt, plot_height)),
            ("DISTRIBUTIONS", build_distributions(receipt)),
            ("TIMESTAMP", timestamp_utc(receipt.generated_at_ms)),
            ("TOOL", escape_html(&tool)),
            ("INTEGRITY", integrity),
            ("REPORT_JSON", build_report_json(receipt)),
        ],
    )
}

/// Substitute `{{KEY}}` placeholders in one pass, so substituted text is
/// never scanned again.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn reference_label(reference: ComparisonReference) -> &'static str {
    match reference {
        ComparisonReference::Latest => "latest month vs baseline",
        ComparisonReference::Average => "rolling average vs baseline",
    }
}

fn timestamp_utc(generated_at_ms: u128) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    let nanos = i128::try_from(generated_at_ms)
        .unwrap_or_default()
        .saturating_mul(1_000_000);
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|t| t.format(&format).ok())
        .unwrap_or_else(|| "1970-01-01 00:00:00 UTC".to_string())
}

fn build_summary_rows(receipt: &ReportReceipt) -> String {
    let mut rows = String::new();
    for category in &receipt.categories {
        let _ = write!(
            rows,
            r#"<tr><td>{name}</td><td class="num">{weight}</td><td class="num">{subtotal}</td></tr>"#,
            name = escape_html(&category.name),
            weight = format_weight(category.weight),
            subtotal = format_signed_pct(category.subtotal),
        );
    }
    rows
}

fn build_warnings(receipt: &ReportReceipt) -> String {
    if receipt.warnings.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<div class="warnings"><strong>Warnings</strong><ul>"#);
    for warning in &receipt.warnings {
        let _ = write!(html, "<li>{}</li>", escape_html(warning));
    }
    html.push_str("</ul></div>");
    html
}

fn build_categories(receipt: &ReportReceipt, plot_height: f64) -> String {
    let mut html = String::new();
    for category in &receipt.categories {
        let _ = write!(
            html,
            r#"<section class="category" style="--cat:{color}"><h2>{name}</h2><div class="grid">"#,
            color = escape_html(&category.color),
            name = escape_html(&category.name),
        );
        for metric in &category.metrics {
            html.push_str(&metric_card(metric, plot_height));
        }
        html.push_str("</div></section>\n");
    }
    html
}

fn metric_card(metric: &MetricRow, plot_height: f64) -> String {
    let contribution = metric
        .contribution
        .map(format_signed_pct)
        .unwrap_or_else(|| "N/A".to_string());
    let chart = match &metric.chart {
        ChartPayload::Axis(chart) => svg::axis_chart(chart, metric.format, plot_height),
        ChartPayload::Donut(chart) => svg::donut_chart(chart),
    };

    format!(
        r#"<article class="metric" data-key="{key}"><h3>{label}</h3>{trend}<dl><dt>Current</dt><dd>{current}</dd><dt>Baseline</dt><dd>{baseline}</dd><dt>Average</dt><dd>{average}</dd><dt>Improvement</dt><dd>{improvement}</dd><dt>Contribution</dt><dd>{contribution}</dd><dt>Weight</dt><dd>{weight}</dd></dl>{chart}</article>"#,
        key = escape_html(&metric.key),
        label = escape_html(&metric.label),
        trend = trend_badge(metric.trend.as_ref()),
        current = format_value(metric.current, metric.format),
        baseline = format_value(metric.baseline, metric.format),
        average = format_value(metric.rolling_average, metric.format),
        improvement = format_improvement(&metric.improvement),
        weight = format_weight(metric.global_weight),
    )
}

/// Arrow follows the raw change; wording and color follow the improvement.
fn trend_badge(trend: Option<&Trend>) -> String {
    let Some(trend) = trend else {
        return String::new();
    };
    let Some(change) = trend.change_pct else {
        return r##"<div class="trend" style="color:#9aa0a6">N/A</div>"##.to_string();
    };

    let arrow = if change > 0.0 {
        "▲"
    } else if change < 0.0 {
        "▼"
    } else {
        "■"
    };
    let description = match trend.direction {
        TrendDirection::Up => "Better",
        TrendDirection::Down => "Worse",
        TrendDirection::Flat => "Stable",
    };
    let color = match trend.tier {
        MagnitudeTier::Significant | MagnitudeTier::Modest => "#34A853",
        MagnitudeTier::Declining => "#EA4335",
        MagnitudeTier::Neutral => "#FBBC05",
        MagnitudeTier::NotApplicable => "#9aa0a6",
    };
    format!(
        r#"<div class="trend" style="color:{color}">{arrow} {pct:.1}% {description}</div>"#,
        pct = change.abs(),
    )
}

fn build_distributions(receipt: &ReportReceipt) -> String {
    if receipt.distributions.is_empty() {
        return String::new();
    }
    let mut html = String::from(
        r#"<section class="category" style="--cat:#9aa0a6"><h2>Distributions</h2><div class="grid">"#,
    );
    for chart in &receipt.distributions {
        let _ = write!(
            html,
            r#"<article class="metric"><h3>{title}</h3>{chart}</article>"#,
            title = escape_html(&chart.title),
            chart = svg::donut_chart(chart),
        );
    }
    html.push_str("</div></section>");
    html
}

fn build_report_json(receipt: &ReportReceipt) -> String {
    // Escape < and > to prevent </script> breakout.
    // JSON remains valid because < and > are valid JSON string escapes.
    serde_json::to_string(receipt)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
