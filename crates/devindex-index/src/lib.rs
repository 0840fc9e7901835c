//! # devindex-index
//!
//! **Tier 2 (Index Aggregation)**
//!
//! Rolls per-metric improvements into weighted contributions, category
//! subtotals and the overall productivity index.
//!
//! Iteration follows the [`Registry`], never the input map, so results do not
//! depend on how inputs were collected.

use devindex_math::{improvement, reference_of};
use devindex_settings::Registry;
use devindex_types::{
    CategoryIndex, ComparisonReference, Improvement, IndexContribution, IndexReport, MetricInput,
    MetricInputs, NaReason, SkippedMetric,
};
use tracing::debug;

/// How the current value of each metric is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexOptions {
    pub reference: ComparisonReference,
    /// Periods in the rolling average; all when `None`.
    pub rolling_window: Option<usize>,
}

/// The value compared against the baseline.
pub fn reference_value(input: &MetricInput, options: &IndexOptions) -> Option<f64> {
    let values: Vec<f64> = input.periods.values().copied().collect();
    reference_of(&values, options.reference, options.rolling_window)
}

/// Improvement of one metric input, or why there is none to compute.
pub fn metric_improvement(
    input: Option<&MetricInput>,
    inverse: bool,
    options: &IndexOptions,
) -> Result<Improvement, NaReason> {
    let input = input.ok_or(NaReason::MissingCurrent)?;
    let current = reference_value(input, options).ok_or(NaReason::MissingCurrent)?;
    let baseline = input.baseline.ok_or(NaReason::MissingBaseline)?;
    Ok(improvement(current, baseline, inverse))
}

/// Aggregate using the latest period of every metric.
pub fn aggregate(inputs: &MetricInputs, registry: &Registry) -> IndexReport {
    aggregate_with(inputs, registry, &IndexOptions::default())
}

/// Aggregate with an explicit comparison reference.
pub fn aggregate_with(
    inputs: &MetricInputs,
    registry: &Registry,
    options: &IndexOptions,
) -> IndexReport {
    let mut categories = Vec::with_capacity(registry.categories().len());
    let mut skipped = Vec::new();

    for entry in registry.categories() {
        let category_weight = entry.weight();
        let mut contributions = Vec::with_capacity(entry.metrics.len());

        for metric in &entry.metrics {
            let improvement =
                match metric_improvement(inputs.metrics.get(&metric.key), metric.inverse, options)
                {
                    Ok(improvement) => improvement,
                    Err(reason) => {
                        debug!(metric = %metric.key, %reason, "skipping metric");
                        skipped.push(SkippedMetric {
                            key: metric.key.clone(),
                            reason,
                        });
                        continue;
                    }
                };

            let global_weight = metric.weight * category_weight;
            let contribution = if category_weight == 0.0 {
                0.0
            } else {
                improvement.pct_or_zero() * metric.weight * category_weight
            };
            contributions.push(IndexContribution {
                key: metric.key.clone(),
                category: entry.name().to_string(),
                improvement,
                global_weight,
                contribution,
            });
        }

        let subtotal = contributions.iter().map(|c| c.contribution).sum();
        categories.push(CategoryIndex {
            name: entry.name().to_string(),
            weight: category_weight,
            subtotal,
            contributions,
        });
    }

    let overall = categories
        .iter()
        .flat_map(|c| c.contributions.iter())
        .map(|c| c.contribution)
        .sum();
    debug!(overall, skipped = skipped.len(), "aggregated productivity index");

    IndexReport {
        categories,
        skipped,
        overall,
    }
}
