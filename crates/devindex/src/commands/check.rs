use anyhow::Result;
use devindex_config::{self as cli, TextFormat};
use serde::Serialize;

use crate::config;

#[derive(Serialize)]
struct CheckSummary<'a> {
    categories: usize,
    metrics: usize,
    warnings: &'a [String],
}

pub(crate) fn handle(args: cli::CheckArgs, global: &cli::GlobalArgs) -> Result<()> {
    let dashboard = config::load(global.config.as_deref())?;
    let registry = &dashboard.registry;
    let summary = CheckSummary {
        categories: registry.categories().len(),
        metrics: registry.len(),
        warnings: registry.warnings(),
    };

    match args.format {
        TextFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        TextFormat::Text => {
            println!(
                "Configuration OK: {} metrics in {} categories",
                summary.metrics, summary.categories
            );
            for warning in summary.warnings {
                println!("warning: {warning}");
            }
        }
    }
    Ok(())
}
