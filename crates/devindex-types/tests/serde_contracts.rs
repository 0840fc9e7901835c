//! JSON contract tests for the public data types.

use std::collections::BTreeMap;

use devindex_types::*;
use serde_json::json;

#[test]
fn period_serializes_as_key_string() {
    let p = Period::month(2025, 5).unwrap();
    assert_eq!(serde_json::to_value(p).unwrap(), json!("2025-05"));
    assert_eq!(serde_json::to_value(Period::Baseline).unwrap(), json!("baseline"));
}

#[test]
fn period_deserialize_rejects_garbage() {
    let got: Result<Period, _> = serde_json::from_value(json!("May 2025"));
    assert!(got.is_err());
}

#[test]
fn metric_input_periods_round_trip_as_map_keys() {
    let mut periods = BTreeMap::new();
    periods.insert(Period::month(2025, 2).unwrap(), 10.0);
    periods.insert(Period::month(2025, 1).unwrap(), 8.0);
    let input = MetricInput {
        baseline: Some(5.0),
        periods,
    };

    let value = serde_json::to_value(&input).unwrap();
    assert_eq!(
        value,
        json!({"baseline": 5.0, "periods": {"2025-01": 8.0, "2025-02": 10.0}})
    );

    let back: MetricInput = serde_json::from_value(value).unwrap();
    assert_eq!(back, input);
    assert_eq!(back.latest(), Some((Period::month(2025, 2).unwrap(), 10.0)));
}

#[test]
fn improvement_is_tagged_by_status() {
    let measured = Improvement::Measured { pct: 16.5 };
    assert_eq!(
        serde_json::to_value(measured).unwrap(),
        json!({"status": "measured", "pct": 16.5})
    );

    let na = Improvement::NotApplicable {
        reason: NaReason::UndefinedBaseline,
    };
    assert_eq!(
        serde_json::to_value(na).unwrap(),
        json!({"status": "not_applicable", "reason": "undefined_baseline"})
    );
}

#[test]
fn chart_payload_is_tagged_by_kind() {
    let donut = ChartPayload::Donut(DonutChart {
        id: "pie_tests".into(),
        title: "Writing Tests".into(),
        slices: vec![],
        total: 0.0,
    });
    let value = serde_json::to_value(&donut).unwrap();
    assert_eq!(value["kind"], "donut");
    assert_eq!(value["id"], "pie_tests");
    assert_eq!(donut.id(), "pie_tests");
}

#[test]
fn enums_use_lowercase_names() {
    assert_eq!(
        serde_json::to_value(ValueFormat::Percentage).unwrap(),
        json!("percentage")
    );
    assert_eq!(serde_json::to_value(ChartStyle::Donut).unwrap(), json!("donut"));
    assert_eq!(
        serde_json::to_value(ComparisonReference::Average).unwrap(),
        json!("average")
    );
}

#[test]
fn policies_fill_missing_fields_with_defaults() {
    let trend: TrendPolicy = serde_json::from_value(json!({"modest_pct": 7.5})).unwrap();
    assert_eq!(trend.modest_pct, 7.5);
    assert_eq!(trend.flat_band_pct, TrendPolicy::default().flat_band_pct);

    let axis: AxisPolicy = serde_json::from_value(json!({})).unwrap();
    assert_eq!(axis, AxisPolicy::default());
}

#[test]
fn latest_period_spans_all_metrics() {
    let mut inputs = MetricInputs::default();
    let mut a = MetricInput::default();
    a.periods.insert(Period::month(2025, 1).unwrap(), 1.0);
    let mut b = MetricInput::default();
    b.periods.insert(Period::month(2025, 4).unwrap(), 1.0);
    inputs.metrics.insert("a".into(), a);
    inputs.metrics.insert("b".into(), b);

    assert_eq!(inputs.latest_period(), Period::month(2025, 4));
}
