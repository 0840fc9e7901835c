use std::fs;

use anyhow::{Context, Result, bail};
use devindex_config as cli;
use devindex_settings::STARTER_CONFIG;

use crate::config::CONFIG_FILE;

pub(crate) fn handle(args: cli::InitArgs) -> Result<()> {
    if args.print {
        print!("{STARTER_CONFIG}");
        return Ok(());
    }

    let path = args.dir.join(CONFIG_FILE);
    if path.exists() && !args.force {
        bail!("{} already exists", path.display());
    }
    fs::create_dir_all(&args.dir)
        .with_context(|| format!("Failed to create directory {}", args.dir.display()))?;
    fs::write(&path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(())
}
