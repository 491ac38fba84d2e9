use report_charts::charts::ChartSlot;
use report_charts::config::Section;
use report_charts::{generate_report, ForestStatus, RenderConfig, ReportError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STATS: &str = r#"{
    "authors": [
        {"Name": "alice", "CommitCount": 6, "Percentage": 60.0, "Additions": 120, "Deletions": 30},
        {"Name": "bob", "CommitCount": 4, "Percentage": 40.0}
    ],
    "hourly": [{"Hour": 9, "Count": 4}, {"Hour": 14, "Count": 6}],
    "daily": [{"Day": "Monday", "Count": 5}, {"Day": "Friday", "Count": 5}],
    "timeline": [{"Date": "2024-01-01", "Count": 2}, {"Date": "2024-01-02", "Count": 8}],
    "files": [{"Name": "src/main.rs", "Count": 7}, {"Name": "README.md", "Count": 3}],
    "summary": {
        "total_commits": 10,
        "contributors": 2,
        "active_days": 2,
        "first_commit": "2024-01-01",
        "last_commit": "2024-01-02"
    }
}"#;

const BRANCHES: &str = r#"{
    "branches": [{"name": "main"}, {"name": "feature"}],
    "commit_graph": [
        {"hash": "a1", "short_hash": "a1", "branch": "main", "author": "alice",
         "date": "2024-01-01T10:00:00Z", "message": "init", "is_merge": false, "parents": []},
        {"hash": "b2", "short_hash": "b2", "branch": "feature", "author": "bob",
         "date": "2024-01-02T11:00:00Z", "message": "work", "is_merge": false, "parents": ["a1"]},
        {"hash": "c3", "short_hash": "c3", "branch": "main", "author": "alice",
         "date": "2024-01-03T12:00:00Z", "message": "merge", "is_merge": true, "parents": ["a1", "b2"]}
    ]
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn config(dir: &TempDir, stats: &str) -> RenderConfig {
    let mut config = RenderConfig::new(write_file(dir.path(), "stats.json", stats));
    config.output_dir = dir.path().join("out");
    config
}

#[test]
fn test_full_report() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(dir.path(), "branches.json", BRANCHES));
    config.analysis = Some(write_file(
        dir.path(),
        "analysis.md",
        "## Summary\nThe team is very active.",
    ));
    config.project = Some("demo".to_string());

    let outcome = generate_report(&config).unwrap();

    assert_eq!(outcome.charts, ChartSlot::ALL.to_vec());
    assert_eq!(outcome.forest, ForestStatus::Drawn { lanes: 2, commits: 3 });
    assert_eq!(outcome.insights, Some(4));
    assert!(outcome.snapshots.is_empty());

    let html = fs::read_to_string(&outcome.index).unwrap();
    assert!(html.contains("<h2>demo</h2>"));
    assert!(html.contains("\"authorsChart\""));
    assert!(html.contains("class=\"commit-node"));
    assert!(html.contains("<option value=\"feature\">feature</option>"));
    assert!(html.contains("ai-analysis-rendered"));
    assert!(html.contains("insight-card"));
    // the page starts collapsed
    assert!(html.contains("class=\"ai-content\""));
}

#[test]
fn test_missing_mandatory_array_draws_no_chart() {
    let dir = TempDir::new().unwrap();
    let stats = r#"{"authors": [{"Name": "a", "CommitCount": 1, "Percentage": 100.0}],
                    "hourly": [], "daily": []}"#;
    let config = config(&dir, stats);

    let outcome = generate_report(&config).unwrap();

    assert!(outcome.charts.is_empty());
    assert_eq!(outcome.forest, ForestStatus::Skipped);
    let html = fs::read_to_string(&outcome.index).unwrap();
    assert!(html.contains("const reportCharts = {};"));
    assert!(html.contains("const forestData = null;"));
}

#[test]
fn test_empty_graph_draws_placeholder() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(
        dir.path(),
        "branches.json",
        r#"{"branches": [{"name": "main"}], "commit_graph": []}"#,
    ));

    let outcome = generate_report(&config).unwrap();

    assert_eq!(outcome.forest, ForestStatus::Placeholder);
    let html = fs::read_to_string(&outcome.index).unwrap();
    assert!(html.contains("No commit data"));
    assert!(!html.contains("class=\"branch-line"));
}

#[test]
fn test_omitted_sections() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(dir.path(), "branches.json", BRANCHES));
    config.omit = vec![Section::Files, Section::Forest, Section::Analysis];

    let outcome = generate_report(&config).unwrap();

    assert_eq!(outcome.charts.len(), 4);
    assert!(!outcome.charts.contains(&ChartSlot::Files));
    assert_eq!(outcome.forest, ForestStatus::Skipped);
    assert_eq!(outcome.insights, None);

    let html = fs::read_to_string(&outcome.index).unwrap();
    assert!(!html.contains("id=\"filesChart\""));
    assert!(!html.contains("id=\"commitForest\""));
    assert!(!html.contains("id=\"aiAnalysis-content\""));
}

#[test]
fn test_png_snapshots() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(dir.path(), "branches.json", BRANCHES));
    config.png_dir = Some(dir.path().join("png"));

    let outcome = generate_report(&config).unwrap();

    assert_eq!(outcome.snapshots.len(), 3);
    assert!(dir.path().join("png/forest-all.png").exists());
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "{ not json");

    let err = generate_report(&config).unwrap_err();
    assert!(matches!(err, ReportError::Json { .. }));
}

#[test]
fn test_null_parents_are_accepted() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(
        dir.path(),
        "branches.json",
        r#"{
            "branches": [{"name": "main"}],
            "commit_graph": [
                {"hash": "a1", "short_hash": "a1", "branch": "main", "author": "alice",
                 "date": "2024-01-01T10:00:00Z", "message": "init", "is_merge": false,
                 "parents": null}
            ]
        }"#,
    ));

    let outcome = generate_report(&config).unwrap();
    assert_eq!(outcome.forest, ForestStatus::Drawn { lanes: 1, commits: 1 });
}

#[test]
fn test_unreadable_optional_inputs_are_skipped() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(dir.path().join("missing-branches.json"));
    config.analysis = Some(dir.path().join("missing-analysis.md"));

    let outcome = generate_report(&config).unwrap();

    assert_eq!(outcome.charts, ChartSlot::ALL.to_vec());
    assert_eq!(outcome.forest, ForestStatus::Skipped);
    let html = fs::read_to_string(&outcome.index).unwrap();
    assert!(html.contains("No AI analysis available"));
    assert!(!html.contains("id=\"aiAnalysisData\""));
}

#[test]
fn test_malformed_branch_graph_is_skipped() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(dir.path(), "branches.json", "[1, 2"));

    let outcome = generate_report(&config).unwrap();
    assert_eq!(outcome.forest, ForestStatus::Skipped);
    assert!(outcome.index.exists());
}

#[test]
fn test_broken_font_fails_snapshots() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, STATS);
    config.branches = Some(write_file(dir.path(), "branches.json", BRANCHES));
    config.png_dir = Some(dir.path().join("png"));
    config.font = Some(write_file(dir.path(), "broken.ttf", "not a font"));

    let err = generate_report(&config).unwrap_err();
    assert!(matches!(err, ReportError::Font { .. }));
}
