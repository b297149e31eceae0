// Report module - Rendering of stored test results

pub mod console;
pub mod html;

use crate::error::Result;
use crate::results::ResultsProvider;
use std::path::{Path, PathBuf};

pub use console::{announce_aggregate, clickable_file_url};
pub use html::HtmlReportRenderer;

/// Name of the entry point file every renderer produces.
pub const REPORT_ENTRY_POINT: &str = "index.html";

/// Renders stored results into a human-readable report.
pub trait ReportRenderer: Send + Sync {
    /// Render `results` into `output_dir` and return the report's entry point.
    ///
    /// The returned path exists on disk whenever this returns `Ok`.
    fn render(&self, results: &dyn ResultsProvider, output_dir: &Path) -> Result<PathBuf>;
}
