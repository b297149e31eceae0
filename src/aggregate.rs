// Aggregate module - Build-wide collection of run outcomes and the aggregate report

use crate::error::{ReportError, Result};
use crate::report::{ReportRenderer, announce_aggregate};
use crate::results::{AggregateResultsProvider, ResultsOpener, with_providers};
use crate::state::{ResultsLocation, RunIdentity, RunOutcome};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Directory under the build reports root that holds the aggregate report.
pub const AGGREGATE_REPORT_DIR: &str = "aggregate-test-results";

/// Receives the outcome of every finished run.
pub trait ExecutionResultsListener: Send + Sync {
    fn record(&self, outcome: RunOutcome);
}

/// What [`AggregateCollector::finalize`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Entry point of the aggregate report, if one was rendered.
    pub report: Option<PathBuf>,
    /// The warning emitted for the report, if any.
    pub announcement: Option<String>,
}

/// Collects run outcomes for the whole build.
///
/// Every finished run records its results location here. At the end of the
/// build a single [`AggregateCollector::finalize`] call renders one report over
/// all runs and points the user at it when more than one run failed.
///
/// `record` may be called concurrently from any number of finalizers.
/// `finalize` must only be called once every finalizer has returned from its
/// close; the build controller provides that ordering.
pub struct AggregateCollector {
    renderer: Arc<dyn ReportRenderer>,
    opener: Arc<dyn ResultsOpener>,
    results: Mutex<HashMap<RunIdentity, ResultsLocation>>,
    failed: AtomicUsize,
    finalized: AtomicBool,
}

impl AggregateCollector {
    pub fn new(renderer: Arc<dyn ReportRenderer>, opener: Arc<dyn ResultsOpener>) -> Self {
        Self {
            renderer,
            opener,
            results: Mutex::new(HashMap::new()),
            failed: AtomicUsize::new(0),
            finalized: AtomicBool::new(false),
        }
    }

    /// Number of distinct runs recorded.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Number of failed records seen so far.
    pub fn failed_count(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Location recorded for `identity`, if any.
    pub fn location_of(&self, identity: &RunIdentity) -> Option<ResultsLocation> {
        self.entries().get(identity).cloned()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::SeqCst)
    }

    /// Render the aggregate report under `reports_root` and announce it when
    /// more than one run failed.
    ///
    /// Does nothing if no run was recorded. A second call fails with
    /// [`ReportError::AlreadyFinalized`].
    pub fn finalize(&self, reports_root: &Path) -> Result<AggregateSummary> {
        if self.finalized.swap(true, Ordering::SeqCst) {
            return Err(ReportError::AlreadyFinalized);
        }

        let mut locations: Vec<ResultsLocation> = self.entries().values().cloned().collect();
        if locations.is_empty() {
            debug!("No test runs recorded; skipping aggregate report");
            return Ok(AggregateSummary::default());
        }
        locations.sort();

        let report_dir = reports_root.join(AGGREGATE_REPORT_DIR);
        let report = with_providers(self.opener.as_ref(), &locations, |providers| {
            self.renderer
                .render(&AggregateResultsProvider::new(providers), &report_dir)
        })?;

        let failed = self.failed_count();
        info!(
            "Aggregated {} test run(s), {} failed, into {}",
            locations.len(),
            failed,
            report.display()
        );

        let announcement = (failed > 1).then(|| announce_aggregate(&report));
        Ok(AggregateSummary {
            report: Some(report),
            announcement,
        })
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<RunIdentity, ResultsLocation>> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExecutionResultsListener for AggregateCollector {
    /// Re-recording an identity replaces its location; each failed record
    /// still counts towards the failure total.
    fn record(&self, outcome: RunOutcome) {
        if self.is_finalized() {
            debug!("Run {} recorded after the aggregate was finalized", outcome.identity);
        }

        if outcome.failed {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }

        let previous = self.entries().insert(outcome.identity.clone(), outcome.location);
        if previous.is_some() {
            debug!("Run {} recorded again; keeping the latest location", outcome.identity);
        }
    }
}
