use runledger::config::{Config, parse_parallel};
use std::path::PathBuf;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.general.parallel, "auto");
    assert_eq!(config.reports.reports_dir, None);
    assert_eq!(config.reports.results_dir, "build/test-results");
    assert_eq!(config.reports.title, "Test results");
    assert_eq!(config.results_dir(), PathBuf::from("build/test-results"));
}

#[test]
fn test_auto_parallelism_is_positive() {
    assert!(Config::default().parallel_jobs() >= 1);
    assert_eq!(parse_parallel(" 6 "), 6);
}

#[test]
fn test_load_from_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".runledger.toml");
    std::fs::write(&path, "[reports]\nreports_dir = \"ci/reports\"\n").expect("write config");

    let config = Config::load_from_file(&path).expect("load config");

    assert_eq!(config.reports_dir(), PathBuf::from("ci/reports"));
    assert_eq!(config.general.parallel, "auto");
}

#[test]
fn test_load_from_missing_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    assert!(Config::load_from_file(&temp_dir.path().join("absent.toml")).is_none());
}
