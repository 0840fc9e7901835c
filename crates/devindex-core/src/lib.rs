//! # devindex-core
//!
//! **Tier 3 (Pipeline)**
//!
//! The primary library interface for `devindex`. Coordinates loading, index
//! aggregation, series assembly, axis layout and chart mapping to produce a
//! [`ReportReceipt`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use devindex_core::report_workflow;
//! use devindex_settings::load_dashboard;
//!
//! let dashboard = load_dashboard(Path::new("devindex.toml")).expect("config");
//! let receipt = report_workflow(Path::new("data/baseline"), Path::new("data/ongoing"), &dashboard)
//!     .expect("report");
//! println!("Productivity index: {:.1}%", receipt.overall_index);
//! ```

pub mod format;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use devindex_chart::{ChartOptions, chart_id, donut, render_series};
use devindex_index::{IndexOptions, aggregate_with};
use devindex_series::{rolling_average, series_from_input, trend};
use devindex_settings::{Dashboard, Registry, ReportSettings};
use devindex_types::{
    AxisFormat, CategorySection, ChartPayload, Improvement, IndexReport, IntegrityReport,
    MetricDefinition, MetricInputs, MetricRow, MetricSeries, NaReason, ReportReceipt,
    SCHEMA_VERSION, ToolInfo,
};
use serde::Serialize;
use tracing::{debug, warn};

pub use devindex_settings as settings;
pub use devindex_types as types;

/// Load both data directories and generate a receipt stamped with the
/// current time. Loader warnings are carried into the receipt.
pub fn report_workflow(
    baseline_dir: &Path,
    ongoing_dir: &Path,
    dashboard: &Dashboard,
) -> Result<ReportReceipt> {
    let loaded = devindex_load::load_dirs(baseline_dir, ongoing_dir).with_context(|| {
        format!(
            "Failed to load metrics from {} and {}",
            baseline_dir.display(),
            ongoing_dir.display()
        )
    })?;
    let mut receipt = generate_at(&loaded.inputs, dashboard, now_ms(), ToolInfo::current())?;
    let mut warnings = loaded.warnings;
    warnings.append(&mut receipt.warnings);
    receipt.warnings = warnings;
    Ok(receipt)
}

/// Index only, without series or charts.
pub fn index_workflow(
    baseline_dir: &Path,
    ongoing_dir: &Path,
    dashboard: &Dashboard,
) -> Result<IndexReport> {
    let loaded = devindex_load::load_dirs(baseline_dir, ongoing_dir)?;
    warn_unknown_keys(&loaded.inputs, &dashboard.registry);
    Ok(aggregate_with(
        &loaded.inputs,
        &dashboard.registry,
        &index_options(&dashboard.settings),
    ))
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

fn index_options(settings: &ReportSettings) -> IndexOptions {
    IndexOptions {
        reference: settings.reference,
        rolling_window: settings.rolling_window,
    }
}

/// Input keys the registry does not know, each logged once.
pub fn warn_unknown_keys(inputs: &MetricInputs, registry: &Registry) -> Vec<String> {
    inputs
        .metrics
        .keys()
        .filter(|key| !registry.contains(key))
        .map(|key| {
            warn!(metric = %key, "ignoring metric not present in configuration");
            format!("Metric '{key}' is not configured and was ignored")
        })
        .collect()
}

/// Generate a receipt. Identical arguments give an identical receipt.
pub fn generate_at(
    inputs: &MetricInputs,
    dashboard: &Dashboard,
    generated_at_ms: u128,
    tool: ToolInfo,
) -> Result<ReportReceipt> {
    let registry = &dashboard.registry;
    let settings = &dashboard.settings;

    let mut warnings: Vec<String> = registry.warnings().to_vec();
    warnings.extend(warn_unknown_keys(inputs, registry));

    let index = aggregate_with(inputs, registry, &index_options(settings));
    debug!(overall = index.overall, "index computed");

    let categories = registry
        .categories()
        .iter()
        .map(|entry| {
            let subtotal = index
                .categories
                .iter()
                .find(|c| c.name == entry.name())
                .map(|c| c.subtotal)
                .unwrap_or(0.0);
            CategorySection {
                name: entry.name().to_string(),
                color: entry.definition.color.clone(),
                weight: entry.weight(),
                subtotal,
                metrics: entry
                    .metrics
                    .iter()
                    .map(|metric| {
                        metric_row(
                            metric,
                            inputs,
                            registry,
                            settings,
                            &entry.definition.color,
                            &index,
                        )
                    })
                    .collect(),
            }
        })
        .collect();

    let distributions = inputs
        .distributions
        .iter()
        .map(|d| donut(d, &settings.chart.palette))
        .collect();

    let latest_period = inputs.latest_period();
    let subtitle = match latest_period {
        Some(period) => format!("Data from {} compared to baseline", period.long_label()),
        None => "Baseline data only - No historical data available".to_string(),
    };

    Ok(ReportReceipt {
        schema_version: SCHEMA_VERSION,
        generated_at_ms,
        tool,
        title: settings.title.clone(),
        subtitle,
        latest_period,
        reference: settings.reference,
        overall_index: index.overall,
        categories,
        distributions,
        warnings,
        integrity: integrity(inputs, registry)?,
    })
}

fn metric_row(
    metric: &MetricDefinition,
    inputs: &MetricInputs,
    registry: &Registry,
    settings: &ReportSettings,
    color: &str,
    index: &IndexReport,
) -> MetricRow {
    let series = match inputs.metrics.get(&metric.key) {
        Some(input) => series_from_input(&metric.key, input),
        None => MetricSeries {
            key: metric.key.clone(),
            points: Vec::new(),
        },
    };

    let contribution = index.contribution(&metric.key);
    let improvement = match (contribution, index.skipped_reason(&metric.key)) {
        (Some(c), _) => c.improvement,
        (None, Some(reason)) => Improvement::NotApplicable { reason },
        (None, None) => Improvement::NotApplicable {
            reason: NaReason::MissingCurrent,
        },
    };

    MetricRow {
        key: metric.key.clone(),
        label: metric.label.clone(),
        format: metric.format,
        inverse: metric.inverse,
        current: series.latest().map(|p| p.value),
        baseline: series.baseline(),
        rolling_average: rolling_average(&series, settings.rolling_window),
        trend: trend(
            &series,
            metric.inverse,
            settings.reference,
            &settings.trend,
            settings.rolling_window,
        ),
        improvement,
        contribution: contribution.map(|c| c.contribution),
        global_weight: registry.global_weight(&metric.key).unwrap_or(0.0),
        chart: chart_for(&series, metric, settings, color),
    }
}

/// Chart payload for one metric series, ticks laid out by devindex-axis.
pub fn chart_for(
    series: &MetricSeries,
    metric: &MetricDefinition,
    settings: &ReportSettings,
    color: &str,
) -> ChartPayload {
    let axis = AxisFormat::infer(metric.format, &series.values());
    let ticks = match series.min_max() {
        Some((min, max)) => devindex_axis::choose_ticks(
            min,
            max,
            axis,
            settings.chart.axis_span_px,
            &settings.axis,
        ),
        None => Vec::new(),
    };
    let options = ChartOptions {
        id: chart_id("chart", &metric.key),
        axis,
        color: color.to_string(),
        baseline_color: settings.chart.baseline_color.clone(),
        palette: settings.chart.palette.clone(),
    };
    render_series(series, ticks, metric.chart, &options)
}

#[derive(Serialize)]
struct IntegrityInput<'a> {
    inputs: &'a MetricInputs,
    registry: &'a Registry,
}

/// blake3 over the canonical JSON of the inputs and the registry.
///
/// Map keys are sorted, so the hash depends only on content.
pub fn integrity(inputs: &MetricInputs, registry: &Registry) -> Result<IntegrityReport> {
    let canonical = serde_json::to_vec(&IntegrityInput { inputs, registry })
        .context("Failed to serialize inputs for hashing")?;
    Ok(IntegrityReport {
        algo: "blake3".to_string(),
        hash: blake3::hash(&canonical).to_hex().to_string(),
    })
}
