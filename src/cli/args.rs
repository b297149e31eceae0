// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// Finalize test runs, record their results and aggregate reports
#[derive(Parser, Debug)]
#[command(name = "runledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Finalize test runs and aggregate their reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay recorded runs, finalize each and aggregate the build
    Finalize(FinalizeArgs),

    /// Render the report for one stored results directory
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FinalizeArgs {
    /// Run files (*.run.json) or directories containing them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Finalize N runs concurrently ("auto" or a number)
    #[arg(short = 'p', long)]
    pub parallel: Option<String>,

    /// Root directory for rendered reports
    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Root directory for durable per-run results
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Directory holding sealed results
    #[arg(required = true)]
    pub results: PathBuf,

    /// Directory to render the report into
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: PathBuf,
}

impl FinalizeArgs {
    /// Merge command-line overrides into the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(parallel) = &self.parallel {
            config.general.parallel = parallel.clone();
        }
        if let Some(dir) = &self.reports_dir {
            config.reports.reports_dir = Some(dir.to_string_lossy().into_owned());
        }
        if let Some(dir) = &self.results_dir {
            config.reports.results_dir = dir.to_string_lossy().into_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_args_override_config() {
        let cli = Cli::parse_from([
            "runledger",
            "finalize",
            "runs/",
            "--parallel",
            "3",
            "--reports-dir",
            "out/reports",
        ]);
        let Some(Commands::Finalize(args)) = cli.command else {
            panic!("expected finalize command");
        };

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.general.parallel, "3");
        assert_eq!(config.reports.reports_dir.as_deref(), Some("out/reports"));
        assert_eq!(config.reports.results_dir, "build/test-results");
        assert_eq!(config.parallel_jobs(), 3);
    }

    #[test]
    fn test_render_requires_output() {
        assert!(Cli::try_parse_from(["runledger", "render", "results/"]).is_err());
    }
}
