//! Report receipt: the structured output handed to renderers.

use serde::{Deserialize, Serialize};

use crate::{
    ChartPayload, ComparisonReference, DonutChart, Improvement, Period, Trend, ValueFormat,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self {
            name: "devindex".to_string(),
            version: "0.0.0".to_string(),
        }
    }
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "devindex".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub algo: String,
    pub hash: String,
}

/// One metric as displayed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub key: String,
    pub label: String,
    pub format: ValueFormat,
    pub inverse: bool,
    pub current: Option<f64>,
    pub baseline: Option<f64>,
    pub rolling_average: Option<f64>,
    pub trend: Option<Trend>,
    pub improvement: Improvement,
    /// `None` when the metric was skipped from the index.
    pub contribution: Option<f64>,
    pub global_weight: f64,
    pub chart: ChartPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySection {
    pub name: String,
    pub color: String,
    pub weight: f64,
    pub subtotal: f64,
    pub metrics: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportReceipt {
    pub schema_version: u32,
    pub generated_at_ms: u128,
    pub tool: ToolInfo,
    pub title: String,
    pub subtitle: String,
    pub latest_period: Option<Period>,
    pub reference: ComparisonReference,
    /// Weighted productivity index in percent.
    pub overall_index: f64,
    pub categories: Vec<CategorySection>,
    pub distributions: Vec<DonutChart>,
    pub warnings: Vec<String>,
    pub integrity: IntegrityReport,
}

impl ReportReceipt {
    pub fn metric(&self, key: &str) -> Option<&MetricRow> {
        self.categories
            .iter()
            .flat_map(|c| c.metrics.iter())
            .find(|m| m.key == key)
    }
}
