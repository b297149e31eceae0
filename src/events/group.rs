// Group reporter - a named group of test events within one run

use crate::error::{ReportError, Result};
use crate::results::ResultsCollector;
use crate::state::TestResult;
use std::sync::Arc;
use tracing::debug;

/// Separator between the names of nested groups.
pub const GROUP_PATH_SEPARATOR: &str = " > ";

/// Lifecycle of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Pending,
    Running,
    Succeeded,
    Skipped,
    Failed,
}

impl GroupStatus {
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Succeeded | Self::Skipped | Self::Failed)
    }
}

/// Reports the tests and child groups of one group into the run's collector.
pub struct GroupEventReporter {
    path: String,
    collector: Arc<ResultsCollector>,
    status: GroupStatus,
    closed: bool,
}

impl GroupEventReporter {
    pub fn new(path: impl Into<String>, collector: Arc<ResultsCollector>) -> Self {
        Self {
            path: path.into(),
            collector,
            status: GroupStatus::Pending,
            closed: false,
        }
    }

    /// Full path of this group, outermost name first.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status(&self) -> GroupStatus {
        self.status
    }

    pub fn started(&mut self) {
        self.status = GroupStatus::Running;
    }

    /// Create a child group sharing this group's collector.
    pub fn group(&self, name: &str) -> GroupEventReporter {
        let path = format!("{}{}{}", self.path, GROUP_PATH_SEPARATOR, name);
        GroupEventReporter::new(path, self.collector.clone())
    }

    /// Report a finished test case belonging to this group.
    pub fn test(&self, result: TestResult) -> Result<()> {
        self.collector.record(result.in_suite(self.path.clone()))
    }

    pub fn succeeded(&mut self) {
        self.complete(GroupStatus::Succeeded);
    }

    pub fn skipped(&mut self) {
        self.complete(GroupStatus::Skipped);
    }

    pub fn failed(&mut self) {
        self.complete(GroupStatus::Failed);
    }

    /// Close the group. A group that started must have completed first.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if self.status == GroupStatus::Running {
            return Err(ReportError::GroupIncomplete(self.path.clone()));
        }
        self.closed = true;
        debug!("Closed group '{}' ({:?})", self.path, self.status);
        Ok(())
    }

    fn complete(&mut self, status: GroupStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RunIdentity;

    fn collector(dir: &std::path::Path) -> Arc<ResultsCollector> {
        Arc::new(ResultsCollector::new(RunIdentity::new("unit"), dir))
    }

    #[test]
    fn test_lifecycle() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let mut group = GroupEventReporter::new("unit", collector(temp_dir.path()));
        assert_eq!(group.status(), GroupStatus::Pending);

        group.started();
        assert_eq!(group.status(), GroupStatus::Running);

        group.succeeded();
        assert!(group.status().is_complete());
        group.close().expect("close");
        group.close().expect("close again");
    }

    #[test]
    fn test_close_running_group_fails() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let mut group = GroupEventReporter::new("unit", collector(temp_dir.path()));
        group.started();

        let err = group.close().expect_err("incomplete");
        assert!(matches!(err, ReportError::GroupIncomplete(path) if path == "unit"));
    }

    #[test]
    fn test_nested_groups_record_paths() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let collector = collector(temp_dir.path());
        let root = GroupEventReporter::new("unit", collector.clone());
        let child = root.group("parser");
        let grandchild = child.group("header");

        assert_eq!(grandchild.path(), "unit > parser > header");
        grandchild.test(TestResult::pass("reads_magic", 1)).expect("record");
        root.test(TestResult::pass("smoke", 1)).expect("record");

        collector.close().expect("seal");
        let stored = crate::results::StoredResultsProvider::open(
            &crate::state::ResultsLocation::new(temp_dir.path()),
        )
        .expect("open");
        let suites: Vec<String> = crate::results::ResultsProvider::results(&stored)
            .expect("results")[0]
            .results
            .all()
            .iter()
            .map(|r| r.suite.clone())
            .collect();
        assert_eq!(suites, vec!["unit > parser > header", "unit"]);
    }
}
