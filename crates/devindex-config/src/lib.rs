//! # devindex-config
//!
//! **Tier 4 (Configuration)**
//!
//! This crate defines the CLI arguments. The dashboard configuration file
//! schema lives in devindex-settings.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Default values and enums
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O operations
//! * Higher-tier crate dependencies

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
pub use devindex_types::{ComparisonReference, ReportFormat, TextFormat};

/// `devindex` - developer productivity index and static dashboard.
///
/// Compares monthly metric snapshots against a baseline and renders a
/// weighted productivity index.
#[derive(Parser, Debug)]
#[command(name = "devindex", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Dashboard configuration (`.toml` or `.json`).
    ///
    /// Defaults to `./devindex.toml`, then `./config/dashboard.json`, then the
    /// user configuration directory.
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the dashboard report (HTML or JSON receipt).
    Report(ReportArgs),

    /// Print per-metric contributions and the overall index.
    Index(IndexArgs),

    /// Validate the dashboard configuration and print warnings.
    Check(CheckArgs),

    /// Write a starter `devindex.toml` to the target directory.
    Init(InitArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory with `baseline.csv` or dated baseline snapshots.
    #[arg(long, value_name = "DIR", default_value = "data/baseline")]
    pub baseline: PathBuf,

    /// Directory with dated monthly snapshots (`*_YYYY-MM.csv`).
    #[arg(long, value_name = "DIR", default_value = "data/ongoing")]
    pub ongoing: PathBuf,

    /// Compare the latest month or the rolling average against the baseline.
    #[arg(long, value_enum)]
    pub reference: Option<ComparisonReference>,

    /// Number of recent months in the rolling average (all when omitted).
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output file. Defaults to `report.html` or `report.json`; `-` writes to stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
    pub format: ReportFormat,

    /// Vertical pixel span of chart value axes.
    #[arg(long, value_name = "PX", value_parser = parse_plot_height)]
    pub plot_height: Option<f64>,
}

/// Accepts a finite, strictly positive pixel count.
pub fn parse_plot_height(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("`{raw}` must be a positive, finite pixel count"))
    }
}

#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = TextFormat::Text)]
    pub format: TextFormat,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = TextFormat::Text)]
    pub format: TextFormat,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Target directory (defaults to ".").
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing `devindex.toml`.
    #[arg(long)]
    pub force: bool,

    /// Print the template to stdout instead of writing a file.
    #[arg(long)]
    pub print: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Powershell,
    Zsh,
}
