// Errors raised while recording, rendering and aggregating test results

use std::path::PathBuf;
use thiserror::Error;

/// An error raised by the results and reporting pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Durable results could not be written.
    #[error("failed to write test results to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Durable results could not be encoded.
    #[error("failed to encode test results for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A results location could not be opened.
    #[error("could not open test results at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A results location exists but does not hold readable results.
    #[error("test results at {path} are corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A provider was read after it had been closed.
    #[error("test results provider for {0} has already been closed")]
    ProviderClosed(PathBuf),

    /// One or more providers failed to release.
    #[error("failed to release {count} test results provider(s): {details}")]
    Release { count: usize, details: String },

    /// A report could not be rendered.
    #[error("failed to render test report into {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A test result arrived after the run's results were sealed.
    #[error("results for run '{0}' have already been sealed")]
    AlreadySealed(String),

    /// A group was closed while still running.
    #[error("test group '{0}' was closed before it completed")]
    GroupIncomplete(String),

    /// The aggregate was finalized a second time.
    #[error("aggregate test results have already been finalized for this build")]
    AlreadyFinalized,

    /// A run failed; carries the user-visible failure message.
    #[error("{0}")]
    RunFailed(String),
}

/// Results over [ReportError].
pub type Result<T> = std::result::Result<T, ReportError>;
