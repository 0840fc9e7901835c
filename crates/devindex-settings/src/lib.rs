//! # devindex-settings
//!
//! **Tier 1 (Pure Settings)**
//!
//! Clap-free dashboard configuration and the validated [`Registry`].
//!
//! ## What belongs here
//! * The dashboard configuration schema (Serde, TOML or JSON)
//! * Validation of categories, weights and metric definitions
//! * Report-level settings (reference, rolling window, policies)
//!
//! ## What does NOT belong here
//! * Clap parsing (use devindex-config)
//! * Metric snapshot loading
//! * Index or chart computation

mod error;
mod policy;
mod registry;

use std::collections::BTreeMap;
use std::path::Path;

use devindex_types::{
    AxisPolicy, CategoryDefinition, ChartSettings, ChartStyle, ComparisonReference,
    MetricDefinition, TrendPolicy, ValueFormat,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;
pub use policy::{validate_axis, validate_chart, validate_trend};
pub use registry::{CategoryEntry, Registry};

/// Starter configuration written by `devindex init`.
pub const STARTER_CONFIG: &str = include_str!("starter.toml");

/// One entry of the metric mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricMapping {
    /// Display name; defaults to the metric key.
    #[serde(default)]
    pub label: Option<String>,
    pub category: String,
    #[serde(default)]
    pub format: ValueFormat,
    /// Lower values are better (defect counts, latencies).
    #[serde(default)]
    pub inverse: bool,
    /// Weight within the category, in `[0, 1]`.
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub chart: ChartStyle,
}

/// The dashboard configuration file.
///
/// Field aliases accept the legacy `dashboard.json` layout
/// (`dashboard_title`, `metrics_mapping`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    #[serde(alias = "dashboard_title")]
    pub title: String,
    /// Category display order. Empty means alphabetical by weight key.
    pub category_order: Vec<String>,
    pub category_weights: BTreeMap<String, f64>,
    pub chart_colors: BTreeMap<String, String>,
    /// Metrics in declaration order, which is their display order.
    #[serde(alias = "metrics_mapping")]
    pub metrics: IndexMap<String, MetricMapping>,
    pub reference: ComparisonReference,
    /// Number of most recent periods in the rolling average; all when unset.
    pub rolling_window: Option<usize>,
    pub trend: TrendPolicy,
    pub axis: AxisPolicy,
    pub chart: ChartSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Developer Productivity Dashboard".to_string(),
            category_order: Vec::new(),
            category_weights: BTreeMap::new(),
            chart_colors: BTreeMap::new(),
            metrics: IndexMap::new(),
            reference: ComparisonReference::default(),
            rolling_window: None,
            trend: TrendPolicy::default(),
            axis: AxisPolicy::default(),
            chart: ChartSettings::default(),
        }
    }
}

/// Report-level settings that are not part of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub title: String,
    pub reference: ComparisonReference,
    pub rolling_window: Option<usize>,
    pub trend: TrendPolicy,
    pub axis: AxisPolicy,
    pub chart: ChartSettings,
}

impl Default for ReportSettings {
    fn default() -> Self {
        DashboardConfig::default().report_settings()
    }
}

/// A validated configuration ready for report generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub registry: Registry,
    pub settings: ReportSettings,
}

impl DashboardConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load configuration from a `.toml` or `.json` file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded dashboard configuration");
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Category names in display order.
    pub fn resolved_category_order(&self) -> Vec<String> {
        if self.category_order.is_empty() {
            self.category_weights.keys().cloned().collect()
        } else {
            self.category_order.clone()
        }
    }

    /// Build the validated registry.
    pub fn registry(&self) -> Result<Registry, ConfigError> {
        let order = self.resolved_category_order();

        if let Some(undeclared) = self
            .category_weights
            .keys()
            .find(|name| !order.contains(name))
        {
            return Err(ConfigError::UndeclaredCategory(undeclared.clone()));
        }

        let mut categories = Vec::with_capacity(order.len());
        for name in order {
            let weight = *self
                .category_weights
                .get(&name)
                .ok_or_else(|| ConfigError::MissingCategoryWeight(name.clone()))?;
            let color = self
                .chart_colors
                .get(&name)
                .cloned()
                .unwrap_or_else(|| self.chart.default_color.clone());
            categories.push(CategoryDefinition {
                name,
                weight,
                color,
            });
        }

        let metrics = self
            .metrics
            .iter()
            .map(|(key, mapping)| MetricDefinition {
                key: key.clone(),
                label: mapping.label.clone().unwrap_or_else(|| key.clone()),
                category: mapping.category.clone(),
                format: mapping.format,
                inverse: mapping.inverse,
                weight: mapping.weight,
                chart: mapping.chart,
            })
            .collect();

        Registry::new(categories, metrics)
    }

    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            title: self.title.clone(),
            reference: self.reference,
            rolling_window: self.rolling_window,
            trend: self.trend,
            axis: self.axis,
            chart: self.chart.clone(),
        }
    }

    /// Validate and split into registry and report settings.
    pub fn build(&self) -> Result<Dashboard, ConfigError> {
        validate_axis(&self.axis)?;
        validate_trend(&self.trend)?;
        validate_chart(&self.chart)?;
        Ok(Dashboard {
            registry: self.registry()?,
            settings: self.report_settings(),
        })
    }
}

/// Load and validate a configuration file in one step.
pub fn load_dashboard(path: &Path) -> Result<Dashboard, ConfigError> {
    DashboardConfig::from_file(path)?.build()
}
