//! # devindex-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the core data structures and contracts for `devindex`.
//! It contains only data types, Serde definitions, and `SCHEMA_VERSION`.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the primary contract is the JSON shape of the
//! [`ReportReceipt`], not Rust struct literals. New fields get sensible
//! defaults; removed or renamed fields bump `SCHEMA_VERSION`.
//!
//! ## What belongs here
//! * Pure data structs (inputs, series, charts, receipts)
//! * Closed enums for value formats, chart styles and axis formats
//! * Policy structs with their documented defaults
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Numeric logic beyond trivial accessors

pub mod policy;
pub mod receipt;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use policy::{AxisPolicy, ChartSettings, ComparisonReference, MAX_TICKS_LIMIT, TrendPolicy};
pub use receipt::{CategorySection, IntegrityReport, MetricRow, ReportReceipt, ToolInfo};

/// The current schema version for report receipts.
pub const SCHEMA_VERSION: u32 = 1;

/// Label used for the synthetic leading point of every series.
pub const BASELINE_LABEL: &str = "Baseline";

/// How a metric value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Plain count or duration.
    #[default]
    Number,
    /// A fraction where `0.25` means 25%.
    Percentage,
}

/// Chart style requested for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Line,
    Bar,
    /// Proportional data; rendered without axis ticks.
    Donut,
}

/// Numeric flavour of an axis, used to pick tick steps and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisFormat {
    Percentage,
    Integer,
    Float,
}

impl AxisFormat {
    /// Percentage metrics stay percentages; numbers are integer axes when
    /// every plotted value is whole.
    pub fn infer(format: ValueFormat, values: &[f64]) -> Self {
        match format {
            ValueFormat::Percentage => AxisFormat::Percentage,
            ValueFormat::Number => {
                if values.iter().all(|v| v.is_finite() && v.fract() == 0.0) {
                    AxisFormat::Integer
                } else {
                    AxisFormat::Float
                }
            }
        }
    }
}

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Self-contained static HTML page.
    #[default]
    Html,
    /// The raw report receipt as pretty JSON.
    Json,
}

/// Output format of terminal summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum TextFormat {
    #[default]
    Text,
    Json,
}

// ---------------------------
// Periods
// ---------------------------

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A reporting period: the baseline or a calendar month.
///
/// Ordering is chronological with the baseline first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    Baseline,
    Month { year: u16, month: u8 },
}

impl Period {
    /// Build a month period; `None` unless `month` is 1..=12.
    pub fn month(year: u16, month: u8) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(Period::Month { year, month })
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self, Period::Baseline)
    }

    /// Stable machine key: `baseline` or `YYYY-MM`.
    pub fn key(&self) -> String {
        match self {
            Period::Baseline => "baseline".to_string(),
            Period::Month { year, month } => format!("{year:04}-{month:02}"),
        }
    }

    /// Display label: `Baseline` or `May 2025`.
    pub fn label(&self) -> String {
        match self {
            Period::Baseline => BASELINE_LABEL.to_string(),
            Period::Month { year, month } => {
                format!("{} {year}", month_name(&MONTH_NAMES, *month))
            }
        }
    }

    /// Long display label used in subtitles: `May 2025`.
    pub fn long_label(&self) -> String {
        const LONG: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        match self {
            Period::Baseline => BASELINE_LABEL.to_string(),
            Period::Month { year, month } => {
                format!("{} {year}", month_name(&LONG, *month))
            }
        }
    }
}

fn month_name<'a>(names: &[&'a str; 12], month: u8) -> &'a str {
    names
        .get(usize::from(month.saturating_sub(1)))
        .copied()
        .unwrap_or("???")
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Error returned when a period key is not `baseline` or `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid period '{}': expected YYYY-MM or baseline", self.0)
    }
}

impl std::error::Error for PeriodParseError {}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("baseline") {
            return Ok(Period::Baseline);
        }
        let err = || PeriodParseError(s.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(err)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(err());
        }
        let year: u16 = year.parse().map_err(|_| err())?;
        let month: u8 = month.parse().map_err(|_| err())?;
        Period::month(year, month).ok_or_else(err)
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.key()
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------
// Registry entries
// ---------------------------

/// One configured metric, validated and owned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub key: String,
    pub label: String,
    pub category: String,
    pub format: ValueFormat,
    pub inverse: bool,
    /// Weight within the category, in `[0, 1]`.
    pub weight: f64,
    pub chart: ChartStyle,
}

/// One configured category in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    /// Weight in the overall index, in `[0, 1]`. Zero means display only.
    pub weight: f64,
    pub color: String,
}

// ---------------------------
// Inputs
// ---------------------------

/// Everything the loading collaborator knows about one metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricInput {
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub periods: BTreeMap<Period, f64>,
}

impl MetricInput {
    /// Most recent period value, if any.
    pub fn latest(&self) -> Option<(Period, f64)> {
        self.periods.iter().next_back().map(|(p, v)| (*p, *v))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub label: String,
    pub value: f64,
}

/// Categorical data such as survey answers, rendered as a donut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub name: String,
    pub entries: Vec<DistributionEntry>,
}

/// The full input set of one report run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricInputs {
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricInput>,
    #[serde(default)]
    pub distributions: Vec<Distribution>,
}

impl MetricInputs {
    /// Latest period present for any metric.
    pub fn latest_period(&self) -> Option<Period> {
        self.metrics
            .values()
            .filter_map(|m| m.periods.keys().next_back().copied())
            .max()
    }
}

// ---------------------------
// Improvements and index
// ---------------------------

/// Why a value could not be turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NaReason {
    /// Baseline is zero while the current value is not.
    UndefinedBaseline,
    /// No value for the comparison period.
    MissingCurrent,
    /// No baseline value recorded.
    MissingBaseline,
}

impl fmt::Display for NaReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NaReason::UndefinedBaseline => "baseline is zero",
            NaReason::MissingCurrent => "no current value",
            NaReason::MissingBaseline => "no baseline value",
        };
        f.write_str(text)
    }
}

/// Percentage improvement relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Improvement {
    Measured { pct: f64 },
    NotApplicable { reason: NaReason },
}

impl Improvement {
    pub fn pct(&self) -> Option<f64> {
        match self {
            Improvement::Measured { pct } => Some(*pct),
            Improvement::NotApplicable { .. } => None,
        }
    }

    /// Numeric fallback used in sums: N/A counts as zero.
    pub fn pct_or_zero(&self) -> f64 {
        self.pct().unwrap_or(0.0)
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Improvement::Measured { .. })
    }

    pub fn reason(&self) -> Option<NaReason> {
        match self {
            Improvement::Measured { .. } => None,
            Improvement::NotApplicable { reason } => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexContribution {
    pub key: String,
    pub category: String,
    pub improvement: Improvement,
    /// `metric.weight * category.weight`.
    pub global_weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedMetric {
    pub key: String,
    pub reason: NaReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIndex {
    pub name: String,
    pub weight: f64,
    pub subtotal: f64,
    pub contributions: Vec<IndexContribution>,
}

/// Output of the index aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    pub categories: Vec<CategoryIndex>,
    pub skipped: Vec<SkippedMetric>,
    pub overall: f64,
}

impl IndexReport {
    pub fn contributions(&self) -> impl Iterator<Item = &IndexContribution> {
        self.categories.iter().flat_map(|c| c.contributions.iter())
    }

    pub fn contribution(&self, key: &str) -> Option<&IndexContribution> {
        self.contributions().find(|c| c.key == key)
    }

    pub fn skipped_reason(&self, key: &str) -> Option<NaReason> {
        self.skipped.iter().find(|s| s.key == key).map(|s| s.reason)
    }
}

// ---------------------------
// Series and trends
// ---------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: Period,
    pub label: String,
    pub value: f64,
}

/// Chronological points of one metric, baseline first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub key: String,
    pub points: Vec<SeriesPoint>,
}

impl MetricSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn baseline(&self) -> Option<f64> {
        self.points
            .first()
            .filter(|p| p.period.is_baseline())
            .map(|p| p.value)
    }

    /// Points excluding the synthetic baseline.
    pub fn period_points(&self) -> impl DoubleEndedIterator<Item = &SeriesPoint> {
        self.points.iter().filter(|p| !p.period.is_baseline())
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.period_points().next_back()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// `(min, max)` over all finite values.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(|p| p.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Improving.
    Up,
    /// Worsening.
    Down,
    Flat,
}

/// Presentation tier of a trend's magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeTier {
    Significant,
    Modest,
    Neutral,
    Declining,
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Raw change relative to baseline, ignoring the inverse flag.
    pub change_pct: Option<f64>,
    pub improvement: Improvement,
    pub direction: TrendDirection,
    pub tier: MagnitudeTier,
    pub reference_value: f64,
    pub baseline_value: f64,
}

// ---------------------------
// Axis and charts
// ---------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Line or bar chart with a tick layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisChart {
    pub id: String,
    pub style: ChartStyle,
    pub axis: AxisFormat,
    pub points: Vec<ChartPoint>,
    pub ticks: Vec<Tick>,
    pub baseline: Option<f64>,
    pub color: String,
    pub baseline_color: String,
    /// Only one point to draw; renderers show a marker instead of a line.
    pub single_point: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutChart {
    pub id: String,
    pub title: String,
    pub slices: Vec<DonutSlice>,
    pub total: f64,
}

/// Shape consumed by the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartPayload {
    Axis(AxisChart),
    Donut(DonutChart),
}

impl ChartPayload {
    pub fn id(&self) -> &str {
        match self {
            ChartPayload::Axis(c) => &c.id,
            ChartPayload::Donut(c) => &c.id,
        }
    }
}
