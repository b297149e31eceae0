// Root reporter - one run's top-level group plus its close-time behavior

use super::group::{GroupEventReporter, GroupStatus};
use crate::aggregate::ExecutionResultsListener;
use crate::error::Result;
use crate::report::ReportRenderer;
use crate::results::{ResultsCollector, ResultsOpener, with_providers};
use crate::state::{DEFAULT_FAILURE_MESSAGE, RunIdentity, RunOutcome, RunVerdict, TestResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Shared services a run needs when it closes.
#[derive(Clone)]
pub struct RunServices {
    pub renderer: Arc<dyn ReportRenderer>,
    pub opener: Arc<dyn ResultsOpener>,
    pub listener: Arc<dyn ExecutionResultsListener>,
}

/// Finalizer for one test-execution run.
///
/// Wraps the run's top-level [`GroupEventReporter`]. Closing seals the results,
/// tells the listener, renders the run's report and only then hands back a
/// failed verdict, so every failure message links to a report on disk.
pub struct RootEventReporter {
    identity: RunIdentity,
    group: GroupEventReporter,
    collector: Arc<ResultsCollector>,
    report_dir: PathBuf,
    services: RunServices,
    failure_message: Option<String>,
}

impl RootEventReporter {
    pub fn new(
        identity: RunIdentity,
        results_dir: impl Into<PathBuf>,
        report_dir: impl Into<PathBuf>,
        services: RunServices,
    ) -> Self {
        let collector = Arc::new(ResultsCollector::new(identity.clone(), results_dir));
        let group = GroupEventReporter::new(identity.name(), collector.clone());
        Self {
            identity,
            group,
            collector,
            report_dir: report_dir.into(),
            services,
            failure_message: None,
        }
    }

    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    pub fn status(&self) -> GroupStatus {
        self.group.status()
    }

    /// Message the run will fail with, if it failed.
    pub fn failure_message(&self) -> Option<&str> {
        self.failure_message.as_deref()
    }

    pub fn started(&mut self) {
        self.group.started();
    }

    pub fn group(&self, name: &str) -> GroupEventReporter {
        self.group.group(name)
    }

    pub fn test(&self, result: TestResult) -> Result<()> {
        self.group.test(result)
    }

    pub fn succeeded(&mut self) {
        self.group.succeeded();
    }

    pub fn skipped(&mut self) {
        self.group.skipped();
    }

    /// Mark the run failed. A blank message falls back to
    /// [`DEFAULT_FAILURE_MESSAGE`]; the last call wins.
    pub fn failed(&mut self, message: &str) {
        self.failure_message = Some(if message.trim().is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            message.to_string()
        });
        self.group.failed();
    }

    /// Alias of [`RootEventReporter::failed`].
    pub fn mark_failed(&mut self, message: &str) {
        self.failed(message);
    }

    /// Finish the run.
    ///
    /// Order matters: results are sealed, the listener is told, the report is
    /// rendered, and only then is a failed verdict returned. A render error is
    /// returned as-is and the listener keeps the record.
    pub fn close(mut self) -> Result<RunVerdict> {
        self.group.close()?;

        let location = self.collector.close()?;
        let failed = self.failure_message.is_some();

        self.services.listener.record(RunOutcome {
            identity: self.identity.clone(),
            location: location.clone(),
            failed,
        });

        let renderer = &self.services.renderer;
        let report_dir = &self.report_dir;
        let report = with_providers(self.services.opener.as_ref(), [&location], |providers| {
            renderer.render(&*providers[0], report_dir)
        })?;

        debug!(
            "Closed run {} ({}), report at {}",
            self.identity,
            if failed { "failed" } else { "passed" },
            report.display()
        );

        Ok(match self.failure_message {
            Some(message) => RunVerdict::Failed { message, report },
            None => RunVerdict::Passed { report },
        })
    }
}
