// HTML reporter - renders stored results as a static page

use super::{REPORT_ENTRY_POINT, ReportRenderer};
use crate::error::{ReportError, Result};
use crate::results::{ResultsProvider, StoredResults};
use crate::state::{TestResults, TestStatus};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// HTML reporter
#[derive(Debug, Clone)]
pub struct HtmlReportRenderer {
    title: String,
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new("Test results")
    }
}

impl HtmlReportRenderer {
    /// Create new HTML reporter
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn page(&self, runs: &[StoredResults]) -> String {
        let mut summary = TestResults::new();
        for run in runs {
            summary.merge(&run.results);
        }

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(&self.title));
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape(&self.title));
        let _ = writeln!(
            html,
            "<p id=\"summary\">{} tests, {} passed, {} failed, {} skipped ({:.0}% successful)</p>",
            summary.total(),
            summary.passed(),
            summary.failed(),
            summary.skipped(),
            summary.pass_rate()
        );
        let _ = writeln!(
            html,
            "<p id=\"generated\">Generated {}</p>",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        for run in runs {
            self.run_section(&mut html, run);
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn run_section(&self, html: &mut String, run: &StoredResults) {
        let results = &run.results;
        let _ = writeln!(html, "<h2>{}</h2>", escape(&run.run_name));
        let _ = writeln!(
            html,
            "<p>{} tests, {} failed, {}ms</p>",
            results.total(),
            results.failed(),
            results.metrics().total_duration_ms
        );
        let metrics = results.metrics();
        if let Some(started) = chrono::DateTime::from_timestamp(metrics.start_time, 0) {
            let _ = writeln!(
                html,
                "<p class=\"timing\">Started {}, finished after {}s</p>",
                started.format("%Y-%m-%d %H:%M:%S UTC"),
                metrics.wall_clock_secs()
            );
        }

        if results.total() == 0 {
            html.push_str("<p>No tests were reported.</p>\n");
            return;
        }

        html.push_str("<table>\n<tr><th>Suite</th><th>Test</th><th>Result</th><th>Duration</th><th>Message</th></tr>\n");
        for result in results.all() {
            let status = match result.status {
                TestStatus::Pass => "passed",
                TestStatus::Fail => "failed",
                TestStatus::Skip => "skipped",
            };
            let _ = writeln!(
                html,
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{:.3}s</td><td>{}</td></tr>",
                status,
                escape(&result.suite),
                escape(&result.name),
                status,
                result.duration_ms as f64 / 1000.0,
                escape(result.error_message.as_deref().unwrap_or(""))
            );
        }
        html.push_str("</table>\n");
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(&self, results: &dyn ResultsProvider, output_dir: &Path) -> Result<PathBuf> {
        let runs = results.results()?;

        fs::create_dir_all(output_dir).map_err(|source| ReportError::Render {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let entry_point = output_dir.join(REPORT_ENTRY_POINT);
        fs::write(&entry_point, self.page(&runs)).map_err(|source| ReportError::Render {
            path: entry_point.clone(),
            source,
        })?;

        debug!("Rendered {} run(s) into {}", runs.len(), entry_point.display());
        Ok(entry_point)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
