// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Number of runs finalized concurrently ("auto" or a number)
    #[serde(default = "default_parallel")]
    pub parallel: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Root directory for rendered reports; unset falls back to the
    /// environment, then the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<String>,

    /// Root directory for durable per-run results
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    /// Title shown on rendered reports
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            reports_dir: None,
            results_dir: default_results_dir(),
            title: default_title(),
        }
    }
}

// Default values
pub const ENV_RUNLEDGER_REPORTS_DIR: &str = "RUNLEDGER_REPORTS_DIR";
pub const CONFIG_FILE_NAME: &str = ".runledger.toml";

pub fn default_parallel() -> String {
    String::from("auto")
}

pub fn default_reports_dir() -> String {
    String::from("build/reports")
}

pub fn default_results_dir() -> String {
    String::from("build/test-results")
}

fn default_title() -> String {
    String::from("Test results")
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .runledger.toml (current directory)
        // 2. ~/.runledger.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let mut paths = vec![cwd.join(CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }

        paths
            .iter()
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(path))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Reports directory: config file, then environment, then default
    pub fn reports_dir(&self) -> PathBuf {
        if let Some(dir) = &self.reports.reports_dir {
            return PathBuf::from(dir);
        }
        std::env::var(ENV_RUNLEDGER_REPORTS_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(default_reports_dir()))
    }

    pub fn results_dir(&self) -> PathBuf {
        PathBuf::from(&self.reports.results_dir)
    }

    /// Resolve the configured parallelism to a job count
    pub fn parallel_jobs(&self) -> usize {
        parse_parallel(&self.general.parallel)
    }
}

/// Parse "auto" or a positive number into a job count
pub fn parse_parallel(value: &str) -> usize {
    match value.trim() {
        "auto" => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
        n => n.parse::<usize>().ok().filter(|&n| n > 0).unwrap_or(1),
    }
}
