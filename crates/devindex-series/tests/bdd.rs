//! Given / When / Then scenarios for series and trends.

use std::collections::BTreeMap;

use devindex_series::{build_series, rolling_average, trend};
use devindex_types::{
    ComparisonReference, MagnitudeTier, NaReason, Period, TrendDirection, TrendPolicy,
};

fn months(values: &[(u16, u8, f64)]) -> BTreeMap<Period, f64> {
    values
        .iter()
        .map(|(y, m, v)| (Period::month(*y, *m).unwrap(), *v))
        .collect()
}

#[test]
fn given_unordered_months_when_building_then_points_are_chronological_after_baseline() {
    let periods = months(&[(2025, 3, 30.0), (2024, 11, 10.0), (2025, 1, 20.0)]);
    let series = build_series("s_prs", Some(5.0), &periods);
    let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Baseline", "Nov 2024", "Jan 2025", "Mar 2025"]);
    assert_eq!(series.values(), vec![5.0, 10.0, 20.0, 30.0]);
}

#[test]
fn given_gap_in_months_when_building_then_gap_is_not_filled() {
    let periods = months(&[(2025, 1, 1.0), (2025, 4, 4.0)]);
    let series = build_series("s_prs", Some(0.0), &periods);
    assert_eq!(series.len(), 3);
}

#[test]
fn given_baseline_only_when_computing_trend_then_there_is_none() {
    let series = build_series("q_bugs", Some(480.0), &BTreeMap::new());
    assert_eq!(series.len(), 1);
    assert!(
        trend(
            &series,
            true,
            ComparisonReference::Latest,
            &TrendPolicy::default(),
            None
        )
        .is_none()
    );
    assert_eq!(rolling_average(&series, None), None);
}

#[test]
fn given_fewer_bugs_when_computing_trend_then_inverse_metric_improves() {
    let series = build_series(
        "q_bugs",
        Some(480.0),
        &months(&[(2025, 1, 450.0), (2025, 2, 400.0)]),
    );
    let trend = trend(
        &series,
        true,
        ComparisonReference::Latest,
        &TrendPolicy::default(),
        None,
    )
    .unwrap();
    assert_eq!(trend.direction, TrendDirection::Up);
    assert_eq!(trend.tier, MagnitudeTier::Modest);
    assert_eq!(trend.reference_value, 400.0);
    assert!(trend.change_pct.unwrap() < 0.0);
    assert!(trend.improvement.pct().unwrap() > 16.0);
}

#[test]
fn given_average_reference_when_computing_trend_then_window_is_used() {
    let series = build_series(
        "s_prs",
        Some(10.0),
        &months(&[(2025, 1, 100.0), (2025, 2, 8.0), (2025, 3, 8.0)]),
    );
    let trend = trend(
        &series,
        false,
        ComparisonReference::Average,
        &TrendPolicy::default(),
        Some(2),
    )
    .unwrap();
    assert_eq!(trend.reference_value, 8.0);
    assert_eq!(trend.direction, TrendDirection::Down);
    assert_eq!(trend.tier, MagnitudeTier::Declining);
}

#[test]
fn given_zero_baseline_when_computing_trend_then_tier_is_not_applicable() {
    let series = build_series("q_vulns", Some(0.0), &months(&[(2025, 1, 2.0)]));
    let trend = trend(
        &series,
        true,
        ComparisonReference::Latest,
        &TrendPolicy::default(),
        None,
    )
    .unwrap();
    assert_eq!(trend.tier, MagnitudeTier::NotApplicable);
    assert_eq!(trend.improvement.reason(), Some(NaReason::UndefinedBaseline));
    assert_eq!(trend.change_pct, None);
}

#[test]
fn given_custom_policy_when_computing_trend_then_thresholds_follow_it() {
    let series = build_series("s_prs", Some(100.0), &months(&[(2025, 1, 103.0)]));
    let policy = TrendPolicy {
        flat_band_pct: 5.0,
        modest_pct: 2.0,
        significant_pct: 50.0,
    };
    let trend = trend(&series, false, ComparisonReference::Latest, &policy, None).unwrap();
    assert_eq!(trend.direction, TrendDirection::Flat);
    assert_eq!(trend.tier, MagnitudeTier::Modest);
}
