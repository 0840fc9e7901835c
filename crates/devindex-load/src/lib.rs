//! # devindex-load
//!
//! **Tier 1 (Loading)**
//!
//! Reads monthly metric snapshots from disk into [`MetricInputs`].
//!
//! ## Layout
//!
//! ```text
//! baseline/
//!   baseline.csv            # optional; otherwise dated files are averaged
//!   metrics_2024-10.csv
//! ongoing/
//!   metrics_2025-01.csv
//!   metrics_2025-02.csv
//!   survey_tools.dist.csv   # label,count pairs for a donut chart
//! ```
//!
//! Snapshot lines are `key,value`. Lines starting with `//` or `#` are
//! comments, empty values and `[]` mark a metric as not collected.
//!
//! ## What does NOT belong here
//! * Registry validation (use devindex-settings)
//! * Improvement or index math

mod error;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use devindex_types::{Distribution, DistributionEntry, MetricInput, MetricInputs, Period};
use tracing::{debug, warn};

pub use error::LoadError;

/// File name of an explicit baseline snapshot.
pub const BASELINE_FILE: &str = "baseline.csv";

const SNAPSHOT_EXT: &str = ".csv";
const DISTRIBUTION_EXT: &str = ".dist.csv";

/// Values of one snapshot file keyed by metric.
pub type Snapshot = BTreeMap<String, f64>;

/// Loaded inputs plus the non-fatal findings met along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub inputs: MetricInputs,
    pub warnings: Vec<String>,
}

/// Extract the first `YYYY-MM` found in a file name.
///
/// Only the leftmost candidate is considered, so `report-2025-13.csv` has no
/// period even if a valid month follows later.
pub fn period_from_name(name: &str) -> Option<Period> {
    let bytes = name.as_bytes();
    if bytes.len() < 7 {
        return None;
    }
    let start = (0..=bytes.len() - 7).find(|&i| {
        let w = &bytes[i..i + 7];
        w[..4].iter().all(u8::is_ascii_digit)
            && w[4] == b'-'
            && w[5..].iter().all(u8::is_ascii_digit)
    })?;
    name.get(start..start + 7)?.parse().ok()
}

/// Parse `key,value` snapshot content.
///
/// Non-numeric values are dropped and reported through `warnings`.
pub fn parse_snapshot(content: &str, source: &str, warnings: &mut Vec<String>) -> Snapshot {
    let mut out = Snapshot::new();
    for (key, value) in pairs(content) {
        match parse_value(value) {
            Some(v) => {
                out.insert(key.to_string(), v);
            }
            None => {
                let msg = format!("{source}: ignoring non-numeric value '{value}' for '{key}'");
                warn!("{msg}");
                warnings.push(msg);
            }
        }
    }
    out
}

/// Parse `label,count` distribution content.
pub fn parse_distribution(name: &str, content: &str, warnings: &mut Vec<String>) -> Distribution {
    let mut entries = Vec::new();
    for (label, value) in pairs(content) {
        match parse_value(value) {
            Some(v) if v >= 0.0 => entries.push(DistributionEntry {
                label: label.to_string(),
                value: v,
            }),
            _ => {
                let msg = format!("{name}: ignoring invalid count '{value}' for '{label}'");
                warn!("{msg}");
                warnings.push(msg);
            }
        }
    }
    Distribution {
        name: name.to_string(),
        entries,
    }
}

fn pairs(content: &str) -> impl Iterator<Item = (&str, &str)> {
    content.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once(',')?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() || value == "[]" {
            return None;
        }
        Some((key, value))
    })
}

fn parse_value(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read one snapshot file.
pub fn load_snapshot(path: &Path, warnings: &mut Vec<String>) -> Result<Snapshot, LoadError> {
    let content = fs::read_to_string(path).map_err(LoadError::io(path))?;
    let snapshot = parse_snapshot(&content, &display_name(path), warnings);
    debug!(path = %path.display(), metrics = snapshot.len(), "loaded snapshot");
    Ok(snapshot)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Files of a directory sorted by name.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(LoadError::io(dir))? {
        let path = entry.map_err(LoadError::io(dir))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Dated snapshots of a directory, merged per period.
///
/// When two files share a period the later file name wins per key.
pub fn load_periods(
    dir: &Path,
    warnings: &mut Vec<String>,
) -> Result<BTreeMap<Period, Snapshot>, LoadError> {
    let mut periods: BTreeMap<Period, Snapshot> = BTreeMap::new();
    let mut origin: BTreeMap<Period, String> = BTreeMap::new();

    for path in sorted_files(dir)? {
        let name = file_name(&path);
        if !name.ends_with(SNAPSHOT_EXT) || name.ends_with(DISTRIBUTION_EXT) {
            continue;
        }
        let Some(period) = period_from_name(name) else {
            debug!(file = name, "skipping snapshot without a period");
            continue;
        };
        let snapshot = load_snapshot(&path, warnings)?;
        let merged = periods.entry(period).or_default();
        if let Some(previous) = origin.get(&period) {
            let overridden: Vec<&str> = snapshot
                .keys()
                .filter(|k| merged.contains_key(*k))
                .map(String::as_str)
                .collect();
            if !overridden.is_empty() {
                let msg = format!(
                    "{period}: '{name}' overrides {} from '{previous}'",
                    overridden.join(", ")
                );
                warn!("{msg}");
                warnings.push(msg);
            }
        }
        merged.extend(snapshot);
        origin.insert(period, name.to_string());
    }
    Ok(periods)
}

/// Baseline values: `baseline.csv` when present, else the per-key mean of the
/// dated snapshots in `dir`.
pub fn load_baseline(dir: &Path, warnings: &mut Vec<String>) -> Result<Snapshot, LoadError> {
    let explicit = dir.join(BASELINE_FILE);
    if explicit.is_file() {
        return load_snapshot(&explicit, warnings);
    }
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let periods = load_periods(dir, warnings)?;
    if periods.is_empty() {
        let msg = format!("No baseline data found in {}", dir.display());
        warn!("{msg}");
        warnings.push(msg);
        return Ok(Snapshot::new());
    }
    debug!(periods = periods.len(), "averaging baseline snapshots");

    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for snapshot in periods.values() {
        for (key, value) in snapshot {
            samples.entry(key.as_str()).or_default().push(*value);
        }
    }
    Ok(samples
        .into_iter()
        .filter_map(|(key, values)| devindex_math::mean(&values).map(|m| (key.to_string(), m)))
        .collect())
}

/// Distributions in `dir`, named after the file stem.
pub fn load_distributions(
    dir: &Path,
    warnings: &mut Vec<String>,
) -> Result<Vec<Distribution>, LoadError> {
    let mut out = Vec::new();
    for path in sorted_files(dir)? {
        let name = file_name(&path);
        let Some(stem) = name.strip_suffix(DISTRIBUTION_EXT) else {
            continue;
        };
        let content = fs::read_to_string(&path).map_err(LoadError::io(&path))?;
        let distribution = parse_distribution(stem, &content, warnings);
        debug!(file = name, slices = distribution.entries.len(), "loaded distribution");
        out.push(distribution);
    }
    Ok(out)
}

/// Assemble snapshot maps into [`MetricInputs`].
pub fn assemble(
    baseline: Snapshot,
    periods: BTreeMap<Period, Snapshot>,
    distributions: Vec<Distribution>,
) -> MetricInputs {
    let mut metrics: BTreeMap<String, MetricInput> = BTreeMap::new();
    for (key, value) in baseline {
        metrics.entry(key).or_default().baseline = Some(value);
    }
    for (period, snapshot) in periods {
        for (key, value) in snapshot {
            metrics.entry(key).or_default().periods.insert(period, value);
        }
    }
    MetricInputs {
        metrics,
        distributions,
    }
}

/// Load baseline and ongoing directories.
pub fn load_dirs(baseline_dir: &Path, ongoing_dir: &Path) -> Result<Loaded, LoadError> {
    let mut warnings = Vec::new();
    let baseline = load_baseline(baseline_dir, &mut warnings)?;
    let periods = load_periods(ongoing_dir, &mut warnings)?;
    let distributions = load_distributions(ongoing_dir, &mut warnings)?;
    debug!(
        baseline_metrics = baseline.len(),
        periods = periods.len(),
        distributions = distributions.len(),
        "loaded metric inputs"
    );
    Ok(Loaded {
        inputs: assemble(baseline, periods, distributions),
        warnings,
    })
}
