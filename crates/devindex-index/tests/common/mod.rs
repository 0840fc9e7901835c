#![allow(dead_code)]

use devindex_settings::Registry;
use devindex_types::{
    CategoryDefinition, ChartStyle, MetricDefinition, MetricInput, MetricInputs, Period,
    ValueFormat,
};

pub fn category(name: &str, weight: f64) -> CategoryDefinition {
    CategoryDefinition {
        name: name.into(),
        weight,
        color: "#4285F4".into(),
    }
}

pub fn metric(key: &str, category: &str, weight: f64, inverse: bool) -> MetricDefinition {
    MetricDefinition {
        key: key.into(),
        label: key.into(),
        category: category.into(),
        format: ValueFormat::Number,
        inverse,
        weight,
        chart: ChartStyle::Line,
    }
}

pub fn registry(categories: Vec<CategoryDefinition>, metrics: Vec<MetricDefinition>) -> Registry {
    Registry::new(categories, metrics).expect("valid registry")
}

pub fn observed(baseline: f64, current: f64) -> MetricInput {
    MetricInput {
        baseline: Some(baseline),
        periods: [(Period::month(2025, 5).unwrap(), current)]
            .into_iter()
            .collect(),
    }
}

pub fn inputs(entries: &[(&str, MetricInput)]) -> MetricInputs {
    MetricInputs {
        metrics: entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
        distributions: Vec::new(),
    }
}

/// Five categories with one weight-1.0 metric each.
pub fn five_categories() -> Registry {
    registry(
        vec![
            category("Adoption", 0.0),
            category("Speed", 0.38),
            category("Quality", 0.4),
            category("Experience", 0.12),
            category("Delivery", 0.1),
        ],
        vec![
            metric("a_users", "Adoption", 1.0, false),
            metric("s_prs", "Speed", 1.0, false),
            metric("q_coverage", "Quality", 1.0, false),
            metric("e_satisfaction", "Experience", 1.0, false),
            metric("d_deployments", "Delivery", 1.0, false),
        ],
    )
}
