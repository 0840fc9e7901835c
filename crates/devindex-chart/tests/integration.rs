use std::collections::BTreeMap;

use devindex_chart::{ChartOptions, chart_id, donut, render_series};
use devindex_types::{
    AxisFormat, ChartPayload, ChartStyle, Distribution, DistributionEntry, MetricSeries, Period,
    SeriesPoint, Tick,
};

fn options() -> ChartOptions {
    ChartOptions {
        id: chart_id("chart", "q_bugs"),
        axis: AxisFormat::Integer,
        color: "#34A853".into(),
        baseline_color: "#CCCCCC".into(),
        palette: vec!["#111111".into(), "#222222".into()],
    }
}

fn series(baseline: Option<f64>, values: &[(u8, f64)]) -> MetricSeries {
    let mut points = Vec::new();
    if let Some(v) = baseline {
        points.push(SeriesPoint {
            period: Period::Baseline,
            label: "Baseline".into(),
            value: v,
        });
    }
    let months: BTreeMap<Period, f64> = values
        .iter()
        .map(|(m, v)| (Period::month(2025, *m).unwrap(), *v))
        .collect();
    points.extend(months.into_iter().map(|(p, v)| SeriesPoint {
        period: p,
        label: p.label(),
        value: v,
    }));
    MetricSeries {
        key: "q_bugs".into(),
        points,
    }
}

fn ticks() -> Vec<Tick> {
    vec![
        Tick { value: 400.0, label: "400".into() },
        Tick { value: 500.0, label: "500".into() },
    ]
}

#[test]
fn line_chart_carries_points_ticks_and_baseline() {
    let payload = render_series(
        &series(Some(480.0), &[(1, 450.0), (2, 400.0)]),
        ticks(),
        ChartStyle::Line,
        &options(),
    );
    let ChartPayload::Axis(chart) = payload else {
        panic!("expected axis chart");
    };
    assert_eq!(chart.id, "chart-q-bugs");
    assert_eq!(chart.style, ChartStyle::Line);
    assert_eq!(chart.points.len(), 3);
    assert_eq!(chart.points[0].label, "Baseline");
    assert_eq!(chart.baseline, Some(480.0));
    assert_eq!(chart.ticks.len(), 2);
    assert!(!chart.single_point);
}

#[test]
fn baseline_only_series_renders_single_point() {
    let payload = render_series(&series(Some(480.0), &[]), ticks(), ChartStyle::Bar, &options());
    let ChartPayload::Axis(chart) = payload else {
        panic!("expected axis chart");
    };
    assert!(chart.single_point);
    assert_eq!(chart.style, ChartStyle::Bar);
}

#[test]
fn empty_series_renders_without_points() {
    let payload = render_series(&series(None, &[]), Vec::new(), ChartStyle::Line, &options());
    let ChartPayload::Axis(chart) = payload else {
        panic!("expected axis chart");
    };
    assert!(chart.points.is_empty());
    assert!(!chart.single_point);
    assert_eq!(chart.baseline, None);
}

#[test]
fn donut_style_maps_period_points_to_slices() {
    let payload = render_series(
        &series(Some(10.0), &[(1, 3.0), (2, 1.0), (3, 2.0)]),
        ticks(),
        ChartStyle::Donut,
        &options(),
    );
    let ChartPayload::Donut(chart) = payload else {
        panic!("expected donut chart");
    };
    assert_eq!(chart.slices.len(), 3);
    assert_eq!(chart.total, 6.0);
    assert_eq!(chart.slices[2].color, "#111111");
    assert_eq!(chart.slices[0].label, "Jan 2025");
}

#[test]
fn distribution_donut_skips_invalid_counts() {
    let distribution = Distribution {
        name: "survey_tools".into(),
        entries: vec![
            DistributionEntry { label: "IDE".into(), value: 12.0 },
            DistributionEntry { label: "Broken".into(), value: -1.0 },
            DistributionEntry { label: "Terminal".into(), value: 5.0 },
        ],
    };
    let chart = donut(&distribution, &["#A".to_string()]);
    assert_eq!(chart.id, "donut-survey-tools");
    assert_eq!(chart.title, "survey_tools");
    assert_eq!(chart.total, 17.0);
    let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["IDE", "Terminal"]);
    assert!(chart.slices.iter().all(|s| s.color == "#A"));

    let json = serde_json::to_value(ChartPayload::Donut(chart)).unwrap();
    assert_eq!(json["kind"], "donut");
}
