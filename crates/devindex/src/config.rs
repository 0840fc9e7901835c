//! Dashboard configuration discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use devindex_config::DataArgs;
use devindex_settings::{Dashboard, load_dashboard};
use tracing::debug;

/// File name written by `devindex init` and looked up in the working directory.
pub(crate) const CONFIG_FILE: &str = "devindex.toml";

/// Candidate locations, in lookup order, when `--config` is not given.
pub(crate) fn default_candidates(cwd: &Path) -> Vec<PathBuf> {
    let mut out = vec![
        cwd.join(CONFIG_FILE),
        cwd.join("config").join("dashboard.json"),
    ];
    if let Some(dir) = dirs::config_dir() {
        out.push(dir.join("devindex").join("config.toml"));
    }
    out
}

/// The explicit path, or the first existing candidate.
pub(crate) fn resolve_path(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let candidates = default_candidates(cwd);
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => bail!(
            "No dashboard configuration found (looked for {})",
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Resolve, load and validate the dashboard configuration.
pub(crate) fn load(explicit: Option<&Path>) -> Result<Dashboard> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let path = resolve_path(explicit, &cwd)?;
    debug!(path = %path.display(), "using dashboard configuration");
    load_dashboard(&path).with_context(|| format!("Invalid configuration {}", path.display()))
}

/// Apply `--reference` and `--window` on top of the file settings.
pub(crate) fn apply_overrides(dashboard: &mut Dashboard, data: &DataArgs) {
    if let Some(reference) = data.reference {
        dashboard.settings.reference = reference;
    }
    if let Some(window) = data.window {
        dashboard.settings.rolling_window = Some(window);
    }
}
