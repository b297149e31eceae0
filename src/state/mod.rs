// State module - Test results and run outcomes
// Centralized data model shared by finalizers, providers and renderers

pub mod metrics;
pub mod outcome;
pub mod result;

pub use metrics::ExecutionMetrics;
pub use outcome::{DEFAULT_FAILURE_MESSAGE, ResultsLocation, RunIdentity, RunOutcome, RunVerdict};
pub use result::TestResult;

use serde::{Deserialize, Serialize};

/// Test results storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    results: Vec<TestResult>,
    pub metrics: ExecutionMetrics,
}

impl Default for TestResults {
    fn default() -> Self {
        Self::new()
    }
}

impl TestResults {
    /// Create new test results
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            results: Vec::new(),
            metrics: ExecutionMetrics::default(),
        }
    }

    /// Add a test result
    pub fn add(&mut self, result: TestResult) {
        self.metrics.total_duration_ms += result.duration_ms;
        self.total += 1;

        match result.status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
        }

        self.results.push(result);
    }

    /// Fold another set of results into this one
    pub fn merge(&mut self, other: &TestResults) {
        for result in other.all() {
            self.add(result.clone());
        }
        self.metrics.start_time = self.metrics.start_time.min(other.metrics.start_time);
        self.metrics.end_time = self.metrics.end_time.max(other.metrics.end_time);
    }

    /// Get total tests
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get passed tests
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Get failed tests
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Get skipped tests
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Get all results
    pub fn all(&self) -> &[TestResult] {
        &self.results
    }

    /// Get pass rate over executed (non-skipped) tests
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            0.0
        } else {
            (self.passed as f64 / executed as f64) * 100.0
        }
    }

    /// Get execution metrics
    pub fn metrics(&self) -> &ExecutionMetrics {
        &self.metrics
    }
}

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}
