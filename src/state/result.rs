// Test result structures

use crate::state::TestStatus;
use serde::{Deserialize, Serialize};

/// Test result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    /// Path of the group that reported this test, e.g. `unit > parser`
    #[serde(default)]
    pub suite: String,
    pub status: TestStatus,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default = "now")]
    pub execution_time: i64,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl TestResult {
    /// Create a pass result
    pub fn pass(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            suite: String::new(),
            status: TestStatus::Pass,
            duration_ms,
            error_message: None,
            execution_time: now(),
        }
    }

    /// Create a fail result
    pub fn fail(name: impl Into<String>, error_message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            suite: String::new(),
            status: TestStatus::Fail,
            duration_ms,
            error_message: Some(error_message.into()),
            execution_time: now(),
        }
    }

    /// Create a skip result
    pub fn skip(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite: String::new(),
            status: TestStatus::Skip,
            duration_ms: 0,
            error_message: Some(reason.into()),
            execution_time: now(),
        }
    }

    /// Attach the reporting group's path
    pub fn in_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = suite.into();
        self
    }
}
