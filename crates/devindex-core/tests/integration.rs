use std::fs;

use devindex_core::{index_workflow, report_workflow};
use devindex_settings::{DashboardConfig, STARTER_CONFIG};
use tempfile::tempdir;

#[test]
fn report_workflow_reads_directories_end_to_end() {
    let root = tempdir().unwrap();
    let baseline = root.path().join("baseline");
    let ongoing = root.path().join("ongoing");
    fs::create_dir_all(&baseline).unwrap();
    fs::create_dir_all(&ongoing).unwrap();
    fs::write(
        baseline.join("baseline.csv"),
        "q_bugs,480\ns_merged_prs,100\nnot_configured,1\n",
    )
    .unwrap();
    fs::write(ongoing.join("metrics_2025-04.csv"), "q_bugs,450\ns_merged_prs,105\n").unwrap();
    fs::write(
        ongoing.join("metrics_2025-05.csv"),
        "// collected monthly\nq_bugs,400\ns_merged_prs,110\ns_pr_review_time,[]\n",
    )
    .unwrap();
    fs::write(ongoing.join("survey_tools.dist.csv"), "IDE,12\nTerminal,5\n").unwrap();

    let dashboard = DashboardConfig::from_toml(STARTER_CONFIG)
        .unwrap()
        .build()
        .unwrap();
    let receipt = report_workflow(&baseline, &ongoing, &dashboard).unwrap();

    // q_bugs: 16.67 * 0.25 * 0.4; s_merged_prs: 10 * 0.6 * 0.38
    assert!((receipt.overall_index - (1.6667 + 2.28)).abs() < 1e-3);
    assert_eq!(receipt.distributions.len(), 1);
    assert_eq!(receipt.distributions[0].total, 17.0);
    assert!(receipt.warnings.iter().any(|w| w.contains("not_configured")));
    assert_eq!(receipt.tool.name, "devindex");
    assert!(receipt.generated_at_ms > 0);

    let index = index_workflow(&baseline, &ongoing, &dashboard).unwrap();
    assert_eq!(index.overall, receipt.overall_index);
}

#[test]
fn report_workflow_reports_missing_directory() {
    let root = tempdir().unwrap();
    let dashboard = DashboardConfig::from_toml(STARTER_CONFIG)
        .unwrap()
        .build()
        .unwrap();
    let err = report_workflow(root.path(), &root.path().join("absent"), &dashboard).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("Failed to load metrics"));
    assert!(chain.contains("absent"));
}
