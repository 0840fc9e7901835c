use anyhow::{Context, Result};
use devindex_config::{self as cli, TextFormat};
use devindex_core::format::{format_improvement, format_signed_pct, format_weight};
use devindex_core::index_workflow;
use devindex_types::IndexReport;

use crate::config;

pub(crate) fn handle(args: cli::IndexArgs, global: &cli::GlobalArgs) -> Result<()> {
    let mut dashboard = config::load(global.config.as_deref())?;
    config::apply_overrides(&mut dashboard, &args.data);

    let report = index_workflow(&args.data.baseline, &args.data.ongoing, &dashboard)
        .with_context(|| {
            format!(
                "Failed to load metrics from {} and {}",
                args.data.baseline.display(),
                args.data.ongoing.display()
            )
        })?;

    match args.format {
        TextFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        TextFormat::Text => print!("{}", render_text(&report)),
    }
    Ok(())
}

fn render_text(report: &IndexReport) -> String {
    let mut out = String::new();
    for category in &report.categories {
        out.push_str(&format!(
            "{} (weight {}): {}\n",
            category.name,
            format_weight(category.weight),
            format_signed_pct(category.subtotal)
        ));
        for c in &category.contributions {
            out.push_str(&format!(
                "  {:<28} {:>9}  x {:>6}  = {}\n",
                c.key,
                format_improvement(&c.improvement),
                format_weight(c.global_weight),
                format_signed_pct(c.contribution)
            ));
        }
    }
    for skipped in &report.skipped {
        out.push_str(&format!("skipped {}: {}\n", skipped.key, skipped.reason));
    }
    out.push_str(&format!(
        "Productivity index: {}\n",
        format_signed_pct(report.overall)
    ));
    out
}
