use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no dashboard configuration found") {
        push_hint(
            &mut out,
            "Create one with `devindex init`, or pass `--config <file>`.",
        );
    }

    if haystack.contains("data directory not found")
        || haystack.contains("no such file or directory")
    {
        push_hint(
            &mut out,
            "Verify the configuration file and the --baseline and --ongoing directories exist.",
        );
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("category weights sum")
        || haystack.contains("has no weight in category_weights")
    {
        push_hint(
            &mut out,
            "Give every category in category_order a weight; the weights must total more than 0 and at most 1.",
        );
    }

    if haystack.contains("references unknown category") {
        push_hint(
            &mut out,
            "Add the category to category_order and category_weights, or fix the metric's category.",
        );
    }

    if haystack.contains(" policy: ") {
        push_hint(
            &mut out,
            "Adjust the [axis], [trend] or [chart] table, or delete it to use the defaults.",
        );
    }

    if haystack.contains("already exists") {
        push_hint(&mut out, "Re-run with `--force` to overwrite.");
    }

    if (haystack.contains("toml") || haystack.contains("json"))
        && (haystack.contains("parse") || haystack.contains("invalid"))
    {
        push_hint(
            &mut out,
            "Check the configuration syntax and key names, or regenerate with `devindex init --force`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
