// Run identities, results locations and terminal outcomes

use crate::error::{ReportError, Result};
use crate::report::console::clickable_file_url;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Failure message used when a run fails without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Test(s) failed.";

/// Opaque token for one test-execution run.
///
/// Two identities are equal only if they were cloned from the same
/// [`RunIdentity::new`] call; the name is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunIdentity {
    id: Uuid,
    name: String,
}

impl RunIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RunIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Directory holding one run's durable results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultsLocation(PathBuf);

impl ResultsLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ResultsLocation {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResultsLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// What a finished run reports to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub identity: RunIdentity,
    pub location: ResultsLocation,
    pub failed: bool,
}

/// Terminal state of a closed run.
///
/// The report has been rendered by the time a verdict exists, so the link in
/// [`RunVerdict::failure_message`] always points at a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunVerdict {
    Passed { report: PathBuf },
    Failed { message: String, report: PathBuf },
}

impl RunVerdict {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Entry point of the run's rendered report.
    pub fn report(&self) -> &Path {
        match self {
            Self::Passed { report } | Self::Failed { report, .. } => report,
        }
    }

    /// User-visible failure message with a link to the report.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Passed { .. } => None,
            Self::Failed { message, report } => Some(format!(
                "{} See the test results for more details: {}",
                message,
                clickable_file_url(report)
            )),
        }
    }

    /// Turn a failed verdict into [`ReportError::RunFailed`].
    pub fn into_result(self) -> Result<PathBuf> {
        match self.failure_message() {
            Some(message) => Err(ReportError::RunFailed(message)),
            None => Ok(match self {
                Self::Passed { report } | Self::Failed { report, .. } => report,
            }),
        }
    }
}
