// Finalize command - replay recorded runs concurrently and aggregate the build

use anyhow::{Context, Result};
use futures::stream::StreamExt;
use tracing::{error, info, warn};

use crate::aggregate::AggregateSummary;
use crate::cli::args::FinalizeArgs;
use crate::config::Config;
use crate::replay::RunScript;
use crate::report::clickable_file_url;
use crate::session::BuildSession;
use crate::state::RunVerdict;
use crate::utils::FileUtils;

/// Everything the build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Verdicts of runs that closed, by run name
    pub verdicts: Vec<(String, RunVerdict)>,
    /// Runs that could not be finalized, with the reason
    pub errors: Vec<(String, String)>,
    pub aggregate: AggregateSummary,
}

impl BuildReport {
    pub fn failed_runs(&self) -> usize {
        self.verdicts.iter().filter(|(_, v)| v.is_failed()).count()
    }

    /// Whether the build should halt with a failure
    pub fn is_failure(&self) -> bool {
        self.failed_runs() > 0 || !self.errors.is_empty()
    }
}

pub async fn handle_finalize(args: &FinalizeArgs, config: &Config) -> Result<BuildReport> {
    let mut config = config.clone();
    args.apply_to(&mut config);

    let mut run_files = Vec::new();
    for path in &args.paths {
        if !path.exists() {
            warn!("Path not found: {}", path.display());
        }
        run_files.extend(FileUtils::collect_run_files(path));
    }
    info!("Found {} run file(s)", run_files.len());

    let scripts = run_files
        .iter()
        .map(|file| RunScript::load(file))
        .collect::<Result<Vec<_>>>()?;

    let session = BuildSession::from_config(&config);
    let report = finalize_runs(&session, scripts, config.parallel_jobs()).await;

    // Every run has closed by now, so the aggregate sees all of them.
    let aggregate = session
        .finish()
        .context("Failed to generate aggregate test report")?;

    Ok(BuildReport {
        aggregate,
        ..report
    })
}

/// Close every run on a blocking worker, at most `parallel` at a time.
pub async fn finalize_runs(
    session: &BuildSession,
    scripts: Vec<RunScript>,
    parallel: usize,
) -> BuildReport {
    let runs: Vec<_> = scripts
        .into_iter()
        .map(|script| {
            let run = session.start_run(&script.name);
            (script, run)
        })
        .collect();

    let outcomes: Vec<_> = futures::stream::iter(runs)
        .map(|(script, run)| async move {
            let name = script.name.clone();
            let outcome = tokio::task::spawn_blocking(move || script.replay(run)).await;
            (name, outcome)
        })
        .buffer_unordered(parallel.max(1))
        .collect()
        .await;

    let mut report = BuildReport::default();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(Ok(verdict)) => {
                match verdict.failure_message() {
                    Some(message) => error!("Run '{}' failed: {}", name, message),
                    None => info!(
                        "Run '{}' passed: {}",
                        name,
                        clickable_file_url(verdict.report())
                    ),
                }
                report.verdicts.push((name, verdict));
            }
            Ok(Err(e)) => {
                error!("Run '{}' could not be finalized: {}", name, e);
                report.errors.push((name, e.to_string()));
            }
            Err(e) => {
                error!("Run '{}' worker panicked: {}", name, e);
                report.errors.push((name, e.to_string()));
            }
        }
    }
    report
}
