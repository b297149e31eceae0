// Results module - Durable per-run results and the providers that read them back

pub mod collector;
pub mod provider;

use crate::error::{ReportError, Result};
use crate::state::{ResultsLocation, TestResults};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

pub use collector::ResultsCollector;
pub use provider::{AggregateResultsProvider, StoredResultsOpener, StoredResultsProvider};

/// File written inside every results location.
pub const RESULTS_FILE: &str = "results.json";

/// Everything one run persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResults {
    pub run_id: Uuid,
    pub run_name: String,
    pub results: TestResults,
}

/// Source of stored results for a renderer.
pub trait ResultsProvider: Send + Sync {
    /// Read the results this provider covers.
    fn results(&self) -> Result<Vec<StoredResults>>;

    /// Release the provider. Calling this more than once is harmless.
    fn close(&self) -> Result<()>;
}

/// Opens providers for results locations.
pub trait ResultsOpener: Send + Sync {
    fn open(&self, location: &ResultsLocation) -> Result<Box<dyn ResultsProvider>>;
}

/// Close every provider, even if some fail.
///
/// Failures are folded into a single [`ReportError::Release`].
pub fn stop_all(providers: &[Box<dyn ResultsProvider>]) -> Result<()> {
    let failures: Vec<String> = providers
        .iter()
        .filter_map(|provider| provider.close().err())
        .map(|e| e.to_string())
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ReportError::Release {
            count: failures.len(),
            details: failures.join("; "),
        })
    }
}

/// Open a provider per location, run `action` over them and release them all.
///
/// Providers are released on every exit path, including a failed open. A
/// release failure only surfaces when nothing failed before it.
pub fn with_providers<'a, T>(
    opener: &dyn ResultsOpener,
    locations: impl IntoIterator<Item = &'a ResultsLocation>,
    action: impl FnOnce(&[Box<dyn ResultsProvider>]) -> Result<T>,
) -> Result<T> {
    let mut providers = Vec::new();
    let outcome = open_and_apply(opener, locations, &mut providers, action);
    let released = stop_all(&providers);

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release)) => Err(release),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release)) => {
            warn!("Suppressed while handling '{}': {}", e, release);
            Err(e)
        }
    }
}

fn open_and_apply<'a, T>(
    opener: &dyn ResultsOpener,
    locations: impl IntoIterator<Item = &'a ResultsLocation>,
    providers: &mut Vec<Box<dyn ResultsProvider>>,
    action: impl FnOnce(&[Box<dyn ResultsProvider>]) -> Result<T>,
) -> Result<T> {
    for location in locations {
        providers.push(opener.open(location)?);
    }
    action(providers.as_slice())
}
