// End-to-end tests for a build session: concurrent runs, then the aggregate

use runledger::commands::finalize_runs;
use runledger::replay::RunScript;
use runledger::report::HtmlReportRenderer;
use runledger::results::StoredResultsOpener;
use runledger::session::BuildSession;
use std::path::Path;
use std::sync::Arc;

fn session(root: &Path) -> BuildSession {
    BuildSession::new(
        root.join("reports"),
        root.join("test-results"),
        Arc::new(HtmlReportRenderer::default()),
        Arc::new(StoredResultsOpener),
    )
}

fn script(json: &str) -> RunScript {
    serde_json::from_str(json).expect("parse run script")
}

fn passing(name: &str) -> RunScript {
    script(&format!(
        r#"{{"name": "{name}", "tests": [{{"name": "smoke", "status": "pass", "duration_ms": 2}}]}}"#
    ))
}

fn failing(name: &str) -> RunScript {
    script(&format!(
        r#"{{"name": "{name}", "groups": [{{"name": "core", "tests": [
            {{"name": "adds", "status": "pass"}},
            {{"name": "subtracts", "status": "fail", "error_message": "expected 1, got 2"}}
        ]}}]}}"#
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_runs_land_in_their_own_directories() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());

    // Act
    let report = finalize_runs(&session, vec![passing("unit"), failing("integration")], 2).await;

    // Assert
    assert!(report.errors.is_empty());
    assert_eq!(report.verdicts.len(), 2);
    for name in ["unit", "integration"] {
        assert!(
            temp_dir
                .path()
                .join("test-results")
                .join(name)
                .join("binary")
                .join("results.json")
                .exists()
        );
        assert!(
            temp_dir
                .path()
                .join("reports")
                .join("tests")
                .join(name)
                .join("index.html")
                .exists()
        );
    }
    assert_eq!(session.collector().len(), 2);
    assert_eq!(session.collector().failed_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failing_run_without_message_uses_default() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());

    // Act
    let report = finalize_runs(&session, vec![failing("integration")], 1).await;

    // Assert
    let (_, verdict) = &report.verdicts[0];
    let message = verdict.failure_message().expect("run failed");
    assert!(message.starts_with("Test(s) failed. See the test results for more details: file://"));
    assert!(verdict.report().exists());
    assert_eq!(report.failed_runs(), 1);
    assert!(report.is_failure());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_explicit_failure_message_is_used() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());
    let run = script(r#"{"name": "lint", "failure_message": "Custom error"}"#);

    // Act
    let report = finalize_runs(&session, vec![run], 1).await;

    // Assert
    let message = report.verdicts[0].1.failure_message().expect("run failed");
    assert!(message.starts_with("Custom error See the test results"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_failure_is_not_announced_at_build_end() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());
    finalize_runs(&session, vec![passing("unit"), failing("integration")], 2).await;

    // Act
    let summary = session.finish().expect("finish build");

    // Assert
    assert!(summary.report.expect("aggregate rendered").exists());
    assert!(summary.announcement.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_runs_aggregate_once() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());
    let scripts: Vec<RunScript> = (0..24)
        .map(|i| {
            if i % 4 == 0 {
                failing(&format!("run{i}"))
            } else {
                passing(&format!("run{i}"))
            }
        })
        .collect();

    // Act
    let report = finalize_runs(&session, scripts, 8).await;
    let summary = session.finish().expect("finish build");

    // Assert
    assert!(report.errors.is_empty());
    assert_eq!(report.verdicts.len(), 24);
    assert_eq!(report.failed_runs(), 6);

    let aggregate = summary.report.expect("aggregate rendered");
    assert_eq!(
        aggregate,
        temp_dir
            .path()
            .join("reports")
            .join("aggregate-test-results")
            .join("index.html")
    );
    let announcement = summary.announcement.expect("announced");
    assert!(announcement.starts_with("Aggregate test results: file://"));

    let content = std::fs::read_to_string(&aggregate).expect("read aggregate");
    assert!(content.contains("<h2>run0</h2>"));
    assert!(content.contains("<h2>run23</h2>"));
}

#[tokio::test]
async fn test_empty_build_produces_nothing() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());

    // Act
    let report = finalize_runs(&session, Vec::new(), 4).await;
    let summary = session.finish().expect("finish build");

    // Assert
    assert!(!report.is_failure());
    assert!(summary.report.is_none());
    assert!(!temp_dir.path().join("reports").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_named_runs_keep_separate_results() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let session = session(temp_dir.path());
    let failing_unit = script(
        r#"{"name": "unit", "tests": [{"name": "alpha_fails", "status": "fail", "error_message": "boom"}]}"#,
    );
    let passing_unit =
        script(r#"{"name": "unit", "tests": [{"name": "beta_passes", "status": "pass"}]}"#);

    // Act
    let report = finalize_runs(&session, vec![failing_unit, passing_unit], 2).await;
    let summary = session.finish().expect("finish build");

    // Assert
    assert!(report.errors.is_empty());
    assert_eq!(report.failed_runs(), 1);
    let failed = report
        .verdicts
        .iter()
        .map(|(_, verdict)| verdict)
        .find(|verdict| verdict.is_failed())
        .expect("failed verdict");
    let failed_report = std::fs::read_to_string(failed.report()).expect("read run report");
    assert!(failed_report.contains("alpha_fails"));
    assert!(!failed_report.contains("beta_passes"));

    for dir in ["unit", "unit-2"] {
        assert!(
            temp_dir
                .path()
                .join("test-results")
                .join(dir)
                .join("binary")
                .join("results.json")
                .exists()
        );
    }

    let aggregate = summary.report.expect("aggregate rendered");
    let content = std::fs::read_to_string(aggregate).expect("read aggregate");
    assert_eq!(content.matches("alpha_fails").count(), 1);
    assert_eq!(content.matches("beta_passes").count(), 1);
}
