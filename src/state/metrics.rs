// Execution metrics

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Execution metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub total_duration_ms: u64,
    pub start_time: i64,
    pub end_time: i64,
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self {
            total_duration_ms: 0,
            start_time: Utc::now().timestamp(),
            end_time: 0,
        }
    }
}

impl ExecutionMetrics {
    /// Stamp the end of execution
    pub fn update_time(&mut self) {
        self.end_time = Utc::now().timestamp();
    }

    /// Wall-clock span in seconds, zero until the end time is stamped
    pub fn wall_clock_secs(&self) -> i64 {
        (self.end_time - self.start_time).max(0)
    }
}
