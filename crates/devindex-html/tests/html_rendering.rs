use devindex_core::generate_at;
use devindex_html::render;
use devindex_settings::{DashboardConfig, STARTER_CONFIG};
use devindex_types::{
    Distribution, DistributionEntry, MetricInput, MetricInputs, Period, ReportReceipt, ToolInfo,
};
use insta::assert_snapshot;

fn receipt_with(title: &str, metrics: Vec<(&str, MetricInput)>) -> ReportReceipt {
    let mut config = DashboardConfig::from_toml(STARTER_CONFIG).unwrap();
    config.title = title.to_string();
    let dashboard = config.build().unwrap();
    let inputs = MetricInputs {
        metrics: metrics
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        distributions: vec![Distribution {
            name: "survey_tools".into(),
            entries: vec![
                DistributionEntry {
                    label: "IDE".into(),
                    value: 3.0,
                },
                DistributionEntry {
                    label: "Terminal".into(),
                    value: 1.0,
                },
            ],
        }],
    };
    generate_at(&inputs, &dashboard, 1_748_736_000_000, ToolInfo::default()).unwrap()
}

fn bugs() -> MetricInput {
    MetricInput {
        baseline: Some(480.0),
        periods: [
            (Period::month(2025, 4).unwrap(), 450.0),
            (Period::month(2025, 5).unwrap(), 400.0),
        ]
        .into_iter()
        .collect(),
    }
}

#[test]
fn render_contains_header_index_and_footer() {
    let html = render(&receipt_with("Team Dashboard", vec![("q_bugs", bugs())]));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Team Dashboard</title>"));
    assert!(html.contains("Data from May 2025 compared to baseline"));
    assert!(html.contains(r#"<span class="value">+1.7%</span>"#));
    assert!(html.contains("Generated 2025-06-01 00:00:00 UTC by devindex 0.0.0"));
    assert!(html.contains("blake3:"));
    assert!(!html.contains("{{"));
}

#[test]
fn render_shows_metric_card_values() {
    let html = render(&receipt_with("D", vec![("q_bugs", bugs())]));
    assert!(html.contains(r#"data-key="q_bugs""#));
    assert!(html.contains("<dt>Current</dt><dd>400</dd>"));
    assert!(html.contains("<dt>Baseline</dt><dd>480</dd>"));
    assert!(html.contains("<dt>Average</dt><dd>425</dd>"));
    assert!(html.contains("<dt>Improvement</dt><dd>+16.7%</dd>"));
    assert!(html.contains("▼ 16.7% Better"));
    assert!(html.contains(r#"id="chart-q-bugs""#));
}

#[test]
fn render_marks_missing_metrics_na() {
    let html = render(&receipt_with("D", vec![("q_bugs", bugs())]));
    assert!(html.contains(r#"data-key="q_code_smells""#));
    assert!(html.contains("<dt>Current</dt><dd>N/A</dd>"));
    assert!(html.contains("No data"));
}

#[test]
fn render_escapes_title_and_embedded_json() {
    let html = render(&receipt_with("</script><b>x</b>", vec![("q_bugs", bugs())]));
    assert!(html.contains("&lt;/script&gt;&lt;b&gt;x&lt;/b&gt;"));
    let script = html
        .split(r#"<script type="application/json" id="report-data">"#)
        .nth(1)
        .unwrap();
    let json = script.split("</script>").next().unwrap();
    assert!(json.contains("\\u003c/script\\u003e"));
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["title"], "</script><b>x</b>");
}

#[test]
fn render_includes_distribution_donut() {
    let html = render(&receipt_with("D", vec![]));
    assert!(html.contains(r#"id="donut-survey-tools""#));
    assert!(html.contains("IDE: 3 (75.0%)"));
    assert!(html.contains("Baseline data only - No historical data available"));
}

#[test]
fn summary_rows_snapshot() {
    let html = render(&receipt_with("D", vec![("q_bugs", bugs())]));
    let start = html.find("<tbody>").unwrap() + "<tbody>".len();
    let end = html.find("</tbody>").unwrap();
    let rows = html[start..end].trim().replace("</tr>", "</tr>\n");
    assert_snapshot!(rows.trim_end(), @r#"
    <tr><td>Adoption</td><td class="num">—</td><td class="num">0.0%</td></tr>
    <tr><td>Speed</td><td class="num">38.0%</td><td class="num">0.0%</td></tr>
    <tr><td>Quality</td><td class="num">40.0%</td><td class="num">+1.7%</td></tr>
    <tr><td>Experience</td><td class="num">12.0%</td><td class="num">0.0%</td></tr>
    <tr><td>Delivery</td><td class="num">10.0%</td><td class="num">0.0%</td></tr>
    "#);
}
