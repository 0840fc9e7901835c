//! The validated metric registry.

use std::collections::BTreeSet;

use devindex_types::{CategoryDefinition, MetricDefinition};
use serde::Serialize;
use tracing::warn;

use crate::ConfigError;

/// Slack allowed when comparing weight sums against 1.0.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// A category with its member metrics, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
    pub definition: CategoryDefinition,
    pub metrics: Vec<MetricDefinition>,
}

impl CategoryEntry {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn weight(&self) -> f64 {
        self.definition.weight
    }

    /// Sum of the member metric weights.
    pub fn metric_weight_sum(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }
}

/// Immutable metric and category definitions for one report run.
///
/// Construction validates everything the index depends on, so a built
/// registry never produces a misleading index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registry {
    categories: Vec<CategoryEntry>,
    warnings: Vec<String>,
}

impl Registry {
    /// Validate definitions. Category order is display order; metrics keep
    /// their given order within each category.
    pub fn new(
        categories: Vec<CategoryDefinition>,
        metrics: Vec<MetricDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.name.clone()));
            }
            if !is_unit_weight(category.weight) {
                return Err(ConfigError::CategoryWeightOutOfRange {
                    name: category.name.clone(),
                    weight: category.weight,
                });
            }
        }

        let sum: f64 = categories.iter().map(|c| c.weight).sum();
        if sum <= 0.0 || sum > 1.0 + WEIGHT_TOLERANCE {
            return Err(ConfigError::CategoryWeightSum { sum });
        }

        let mut entries: Vec<CategoryEntry> = categories
            .into_iter()
            .map(|definition| CategoryEntry {
                definition,
                metrics: Vec::new(),
            })
            .collect();

        let mut keys = BTreeSet::new();
        for metric in metrics {
            if metric.key.trim().is_empty() {
                return Err(ConfigError::EmptyMetricKey);
            }
            if !keys.insert(metric.key.clone()) {
                return Err(ConfigError::DuplicateMetric(metric.key));
            }
            if !is_unit_weight(metric.weight) {
                return Err(ConfigError::MetricWeightOutOfRange {
                    metric: metric.key,
                    weight: metric.weight,
                });
            }
            let Some(entry) = entries
                .iter_mut()
                .find(|e| e.definition.name == metric.category)
            else {
                return Err(ConfigError::UnknownCategory {
                    metric: metric.key,
                    category: metric.category,
                });
            };
            entry.metrics.push(metric);
        }

        let warnings = weight_warnings(&entries);
        for message in &warnings {
            warn!("{message}");
        }

        Ok(Self {
            categories: entries,
            warnings,
        })
    }

    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// All metrics in registry order (category order, then metric order).
    pub fn metrics(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.categories.iter().flat_map(|c| c.metrics.iter())
    }

    pub fn metric(&self, key: &str) -> Option<&MetricDefinition> {
        self.metrics().find(|m| m.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.metric(key).is_some()
    }

    /// Weight of a metric in the overall index.
    pub fn global_weight(&self, key: &str) -> Option<f64> {
        let metric = self.metric(key)?;
        let category = self.category(&metric.category)?;
        Some(metric.weight * category.weight())
    }

    pub fn len(&self) -> usize {
        self.metrics().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-fatal findings such as metric weights not summing to 1.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn is_unit_weight(weight: f64) -> bool {
    weight.is_finite() && (0.0..=1.0).contains(&weight)
}

fn weight_warnings(entries: &[CategoryEntry]) -> Vec<String> {
    let mut out = Vec::new();
    for entry in entries {
        if entry.metrics.is_empty() {
            out.push(format!("Category '{}' has no metrics", entry.name()));
            continue;
        }
        if entry.weight() == 0.0 {
            continue;
        }
        let sum = entry.metric_weight_sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            out.push(format!(
                "Metric weights in category '{}' sum to {:.3}, not 1.0; contributions scale accordingly",
                entry.name(),
                sum
            ));
        }
    }
    out
}
