// Main entry point for runledger

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use runledger::cli::{Cli, Commands};
use runledger::commands;
use runledger::config::{self, Config};
use runledger::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting runledger v{}", env!("CARGO_PKG_VERSION"));
    }

    // Load configuration from file (if exists)
    let loaded = Config::load();
    let config = loaded.clone().unwrap_or_default();

    if cli.config {
        print_config(&config, loaded.is_some());
        return Ok(());
    }

    if let Some(config_file) = &cli.init_config {
        std::fs::write(config_file, Config::default().to_toml())?;
        println!("Configuration file created: {}", config_file.display());
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Finalize(args)) => {
            let report = commands::handle_finalize(args, &config).await?;
            if report.is_failure() {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Render(args)) => commands::handle_render(args, &config).map(|_| ()),
        None => {
            warn!("No command given. Use 'runledger --help' for usage.");
            Ok(())
        }
    }
}

fn print_config(config: &Config, from_file: bool) {
    println!("Current configuration:");
    if from_file {
        println!("  Loaded from {}", config::CONFIG_FILE_NAME);
    } else {
        println!("  No configuration file loaded (defaults)");
    }
    println!("    Parallel: {} ({} jobs)", config.general.parallel, config.parallel_jobs());
    println!("    Reports dir: {}", config.reports_dir().display());
    println!("    Results dir: {}", config.results_dir().display());
    println!("    Report title: {}", config.reports.title);

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Environment variables ({})", config::ENV_RUNLEDGER_REPORTS_DIR);
    println!("  4. Built-in defaults (lowest)");
}
