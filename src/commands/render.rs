// Render command - render the report for one stored results directory

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::args::RenderArgs;
use crate::config::Config;
use crate::report::{HtmlReportRenderer, ReportRenderer, clickable_file_url};
use crate::results::{StoredResultsOpener, with_providers};
use crate::state::ResultsLocation;

pub fn handle_render(args: &RenderArgs, config: &Config) -> Result<PathBuf> {
    let location = ResultsLocation::new(&args.results);
    let renderer = HtmlReportRenderer::new(config.reports.title.clone());

    let report = with_providers(&StoredResultsOpener, [&location], |providers| {
        renderer.render(&*providers[0], &args.output)
    })
    .with_context(|| format!("Failed to render test results from {}", location))?;

    println!("Test results: {}", clickable_file_url(&report));
    Ok(report)
}
