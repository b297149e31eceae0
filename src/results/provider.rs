// Providers that read sealed results back for rendering

use super::{RESULTS_FILE, ResultsOpener, ResultsProvider, StoredResults};
use crate::error::{ReportError, Result};
use crate::state::ResultsLocation;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reads the results file of one sealed location.
///
/// The file is read when the provider is opened, so a missing or corrupt
/// location fails at open time rather than halfway through a render.
pub struct StoredResultsProvider {
    path: PathBuf,
    stored: StoredResults,
    closed: AtomicBool,
}

impl StoredResultsProvider {
    pub fn open(location: &ResultsLocation) -> Result<Self> {
        let path = location.as_path().join(RESULTS_FILE);
        let content = fs::read(&path).map_err(|source| ReportError::Open {
            path: path.clone(),
            source,
        })?;
        let stored = serde_json::from_slice(&content).map_err(|source| ReportError::Corrupt {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            stored,
            closed: AtomicBool::new(false),
        })
    }
}

impl ResultsProvider for StoredResultsProvider {
    fn results(&self) -> Result<Vec<StoredResults>> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ReportError::ProviderClosed(self.path.clone()));
        }
        Ok(vec![self.stored.clone()])
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

/// Opens [`StoredResultsProvider`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredResultsOpener;

impl ResultsOpener for StoredResultsOpener {
    fn open(&self, location: &ResultsLocation) -> Result<Box<dyn ResultsProvider>> {
        Ok(Box::new(StoredResultsProvider::open(location)?))
    }
}

/// Presents several providers as one, in the order given.
///
/// Does not own the providers; closing it leaves them open.
pub struct AggregateResultsProvider<'a> {
    providers: &'a [Box<dyn ResultsProvider>],
}

impl<'a> AggregateResultsProvider<'a> {
    pub fn new(providers: &'a [Box<dyn ResultsProvider>]) -> Self {
        Self { providers }
    }
}

impl ResultsProvider for AggregateResultsProvider<'_> {
    fn results(&self) -> Result<Vec<StoredResults>> {
        let mut all = Vec::new();
        for provider in self.providers {
            all.extend(provider.results()?);
        }
        Ok(all)
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultsCollector;
    use crate::state::{RunIdentity, TestResult};

    fn sealed(root: &std::path::Path, name: &str) -> ResultsLocation {
        let collector = ResultsCollector::new(RunIdentity::new(name), root.join(name));
        collector
            .record(TestResult::pass(format!("{name}_test"), 1))
            .expect("record");
        collector.close().expect("close")
    }

    #[test]
    fn test_open_reads_sealed_results() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let location = sealed(temp_dir.path(), "unit");

        let provider = StoredResultsProvider::open(&location).expect("open");
        let results = provider.results().expect("results");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].run_name, "unit");
    }

    #[test]
    fn test_close_twice_is_harmless() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let location = sealed(temp_dir.path(), "unit");

        let provider = StoredResultsProvider::open(&location).expect("open");
        provider.close().expect("close");
        provider.close().expect("close again");
        assert!(matches!(
            provider.results(),
            Err(ReportError::ProviderClosed(_))
        ));
    }

    #[test]
    fn test_open_missing_location() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let location = ResultsLocation::new(temp_dir.path().join("absent"));

        let err = StoredResultsProvider::open(&location)
            .err()
            .expect("missing location");
        assert!(matches!(err, ReportError::Open { .. }));
    }

    #[test]
    fn test_open_corrupt_location() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(RESULTS_FILE), b"not json").expect("write");

        let err = StoredResultsProvider::open(&ResultsLocation::new(temp_dir.path()))
            .err()
            .expect("corrupt location");
        assert!(matches!(err, ReportError::Corrupt { .. }));
    }

    #[test]
    fn test_aggregate_concatenates() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let providers: Vec<Box<dyn ResultsProvider>> = ["unit", "integration"]
            .iter()
            .map(|name| {
                let location = sealed(temp_dir.path(), name);
                Box::new(StoredResultsProvider::open(&location).expect("open"))
                    as Box<dyn ResultsProvider>
            })
            .collect();

        let aggregate = AggregateResultsProvider::new(&providers);
        let names: Vec<String> = aggregate
            .results()
            .expect("results")
            .into_iter()
            .map(|r| r.run_name)
            .collect();
        assert_eq!(names, vec!["unit", "integration"]);

        aggregate.close().expect("close");
        assert!(providers[0].results().is_ok());
    }
}
