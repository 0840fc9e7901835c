use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use devindex_config::{self as cli, ReportFormat};
use devindex_core::report_workflow;
use tracing::debug;

use crate::config;

pub(crate) fn handle(args: cli::ReportArgs, global: &cli::GlobalArgs) -> Result<()> {
    let mut dashboard = config::load(global.config.as_deref())?;
    config::apply_overrides(&mut dashboard, &args.data);
    if let Some(px) = args.plot_height {
        dashboard.settings.chart.axis_span_px = px;
    }
    let plot_height = dashboard.settings.chart.axis_span_px;

    let receipt = report_workflow(&args.data.baseline, &args.data.ongoing, &dashboard)?;
    debug!(
        overall = receipt.overall_index,
        warnings = receipt.warnings.len(),
        "report generated"
    );

    let rendered = match args.format {
        ReportFormat::Html => devindex_html::render_with_height(&receipt, plot_height),
        ReportFormat::Json => serde_json::to_string_pretty(&receipt)?,
    };

    let out = args.out.unwrap_or_else(|| default_out(args.format));
    if out.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&out, rendered).with_context(|| format!("Failed to write {}", out.display()))?;
    eprintln!(
        "Wrote {} (productivity index {:+.1}%)",
        out.display(),
        receipt.overall_index
    );
    Ok(())
}

fn default_out(format: ReportFormat) -> PathBuf {
    match format {
        ReportFormat::Html => PathBuf::from("report.html"),
        ReportFormat::Json => PathBuf::from("report.json"),
    }
}
