// Session module - Build-scoped wiring of run finalizers and the aggregate

use crate::aggregate::{AggregateCollector, AggregateSummary};
use crate::config::Config;
use crate::error::Result;
use crate::events::{RootEventReporter, RunServices};
use crate::report::{HtmlReportRenderer, ReportRenderer};
use crate::results::{ResultsOpener, StoredResultsOpener};
use crate::state::RunIdentity;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Subdirectory of a run's results directory holding the sealed results.
pub const RUN_RESULTS_SUBDIR: &str = "binary";
/// Subdirectory of the reports root holding per-run reports.
pub const RUN_REPORTS_SUBDIR: &str = "tests";

/// Created at build start, hands out one [`RootEventReporter`] per run and is
/// consumed by [`BuildSession::finish`] once every run has closed.
pub struct BuildSession {
    reports_root: PathBuf,
    results_root: PathBuf,
    collector: Arc<AggregateCollector>,
    services: RunServices,
    issued_dirs: Mutex<HashSet<String>>,
}

impl BuildSession {
    pub fn new(
        reports_root: impl Into<PathBuf>,
        results_root: impl Into<PathBuf>,
        renderer: Arc<dyn ReportRenderer>,
        opener: Arc<dyn ResultsOpener>,
    ) -> Self {
        let collector = Arc::new(AggregateCollector::new(renderer.clone(), opener.clone()));
        let services = RunServices {
            renderer,
            opener,
            listener: collector.clone(),
        };
        Self {
            reports_root: reports_root.into(),
            results_root: results_root.into(),
            collector,
            services,
            issued_dirs: Mutex::new(HashSet::new()),
        }
    }

    /// Session using the HTML renderer and stored results.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.reports_dir(),
            config.results_dir(),
            Arc::new(HtmlReportRenderer::new(config.reports.title.clone())),
            Arc::new(StoredResultsOpener),
        )
    }

    pub fn reports_root(&self) -> &Path {
        &self.reports_root
    }

    pub fn collector(&self) -> &AggregateCollector {
        &self.collector
    }

    /// Start a new run. Every run gets its own results and report
    /// directories; a repeated name gets a numeric suffix (`unit-2`).
    pub fn start_run(&self, name: &str) -> RootEventReporter {
        let identity = RunIdentity::new(name);
        let dir = self.issue_dir(name);
        let results_dir = self.results_root.join(&dir).join(RUN_RESULTS_SUBDIR);
        let report_dir = self.reports_root.join(RUN_REPORTS_SUBDIR).join(&dir);
        debug!("Starting run {} in {}", identity, results_dir.display());

        RootEventReporter::new(identity, results_dir, report_dir, self.services.clone())
    }

    /// End the build: render and maybe announce the aggregate report.
    ///
    /// Call only after every run started from this session has closed.
    pub fn finish(self) -> Result<AggregateSummary> {
        self.collector.finalize(&self.reports_root)
    }

    fn issue_dir(&self, name: &str) -> String {
        let base = dir_name(name);
        let mut issued = self.issued_dirs.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = (1..)
            .map(|n| match n {
                1 => base.clone(),
                n => format!("{base}-{n}"),
            })
            .find(|candidate| !issued.contains(candidate))
            .unwrap_or(base);
        issued.insert(dir.clone());
        dir
    }
}

fn dir_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.trim_matches('.') {
        "" => String::from("run"),
        _ => cleaned,
    }
}
