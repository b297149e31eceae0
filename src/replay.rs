// Replay module - Recorded runs driven through a run finalizer

use crate::error::Result;
use crate::events::{GroupEventReporter, RootEventReporter};
use crate::state::{RunVerdict, TestResult, TestStatus};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Suffix identifying run files.
pub const RUN_FILE_SUFFIX: &str = ".run.json";

/// A recorded run, loaded from a JSON run file:
///
/// ```json
/// {
///   "name": "unit",
///   "failure_message": "optional, overrides the default",
///   "tests": [{ "name": "smoke", "status": "pass", "duration_ms": 4 }],
///   "groups": [{ "name": "parser", "tests": [{ "name": "header", "status": "fail", "error_message": "bad magic" }] }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RunScript {
    pub name: String,
    #[serde(default)]
    pub failure_message: Option<String>,
    #[serde(default)]
    pub tests: Vec<TestResult>,
    #[serde(default)]
    pub groups: Vec<GroupScript>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupScript {
    pub name: String,
    #[serde(default)]
    pub tests: Vec<TestResult>,
}

impl GroupScript {
    fn has_failures(&self) -> bool {
        self.tests.iter().any(|t| t.status == TestStatus::Fail)
    }
}

impl RunScript {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse run file: {}", path.display()))
    }

    /// Whether any test in the run failed.
    pub fn has_failures(&self) -> bool {
        self.tests.iter().any(|t| t.status == TestStatus::Fail)
            || self.groups.iter().any(GroupScript::has_failures)
    }

    /// Feed the recorded events into `run` and close it.
    ///
    /// A run fails if it carries a failure message or any of its tests failed;
    /// without a message the default one is used.
    pub fn replay(&self, mut run: RootEventReporter) -> Result<RunVerdict> {
        run.started();
        for test in &self.tests {
            run.test(test.clone())?;
        }
        for group in &self.groups {
            replay_group(group, run.group(&group.name))?;
        }

        match &self.failure_message {
            Some(message) => run.failed(message),
            None if self.has_failures() => run.failed(""),
            None => run.succeeded(),
        }
        run.close()
    }
}

fn replay_group(script: &GroupScript, mut group: GroupEventReporter) -> Result<()> {
    group.started();
    for test in &script.tests {
        group.test(test.clone())?;
    }
    if script.has_failures() {
        group.failed();
    } else {
        group.succeeded();
    }
    group.close()
}
