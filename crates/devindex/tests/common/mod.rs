//! Shared fixtures for devindex CLI tests.

#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const CONFIG: &str = r##"
title = "Team Dashboard"
category_order = ["Speed", "Quality"]

[category_weights]
Speed = 0.5
Quality = 0.5

[metrics.s_merged_prs]
label = "Merged PRs"
category = "Speed"
weight = 1.0

[metrics.q_bugs]
label = "Bugs"
category = "Quality"
inverse = true
weight = 1.0
"##;

/// A workspace with `devindex.toml`, a baseline file and two months of data.
///
/// Latest month: merged PRs +10%, bugs -20% (inverse, so +20%). Index +15%.
/// Average of both months: +8% and +15%. Index +11.5%.
pub fn workspace() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::write(root.join("devindex.toml"), CONFIG).unwrap();
    write(root, "data/baseline/baseline.csv", "s_merged_prs,100\nq_bugs,10\n");
    write(
        root,
        "data/ongoing/metrics_2024-01.csv",
        "// January\ns_merged_prs,106\nq_bugs,9\n",
    );
    write(
        root,
        "data/ongoing/metrics_2024-02.csv",
        "s_merged_prs,110\nq_bugs,8\n",
    );
    tmp
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A `devindex` command running in `dir` with the user config directory
/// pointed into it, so no real user configuration leaks in.
pub fn devindex(dir: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("devindex");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}
