// Per-run results collector - accumulates test results and seals them to disk

use super::{RESULTS_FILE, StoredResults};
use crate::error::{ReportError, Result};
use crate::state::{ResultsLocation, RunIdentity, TestResult, TestResults};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

struct CollectorState {
    results: TestResults,
    sealed: bool,
}

/// Collects the test results of one run and writes them out once on close.
///
/// Safe to share between the groups of a run. After [`ResultsCollector::close`]
/// the location is immutable and further records are rejected.
pub struct ResultsCollector {
    identity: RunIdentity,
    directory: PathBuf,
    state: Mutex<CollectorState>,
}

impl ResultsCollector {
    pub fn new(identity: RunIdentity, directory: impl Into<PathBuf>) -> Self {
        Self {
            identity,
            directory: directory.into(),
            state: Mutex::new(CollectorState {
                results: TestResults::new(),
                sealed: false,
            }),
        }
    }

    /// Directory the results are written to.
    pub fn results_directory(&self) -> &Path {
        &self.directory
    }

    pub fn record(&self, result: TestResult) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.sealed {
            return Err(ReportError::AlreadySealed(self.identity.name().to_string()));
        }
        state.results.add(result);
        Ok(())
    }

    /// Flush and seal the results. Closing again returns the same location.
    pub fn close(&self) -> Result<ResultsLocation> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let location = ResultsLocation::new(&self.directory);
        if state.sealed {
            return Ok(location);
        }

        state.results.metrics.update_time();
        let stored = StoredResults {
            run_id: self.identity.id(),
            run_name: self.identity.name().to_string(),
            results: state.results.clone(),
        };
        self.write(&stored)?;
        state.sealed = true;

        debug!(
            "Sealed {} result(s) for {} in {}",
            stored.results.total(),
            self.identity,
            location
        );
        Ok(location)
    }

    fn write(&self, stored: &StoredResults) -> Result<()> {
        fs::create_dir_all(&self.directory).map_err(write_error(&self.directory))?;

        let target = self.directory.join(RESULTS_FILE);
        let staging = self.directory.join(format!("{}.tmp", RESULTS_FILE));
        let bytes = serde_json::to_vec(stored).map_err(|source| ReportError::Encode {
            path: target.clone(),
            source,
        })?;

        fs::write(&staging, bytes).map_err(write_error(&staging))?;
        fs::rename(&staging, &target).map_err(write_error(&target))?;
        Ok(())
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError {
    let path = path.to_path_buf();
    move |source| ReportError::Write { path, source }
}
