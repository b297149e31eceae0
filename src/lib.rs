pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod replay;
pub mod report;
pub mod results;
pub mod session;
pub mod state;
pub mod utils;

pub use aggregate::{AggregateCollector, AggregateSummary, ExecutionResultsListener};
pub use error::{ReportError, Result};
pub use events::{GroupEventReporter, RootEventReporter};
pub use session::BuildSession;
pub use state::{RunIdentity, RunOutcome, RunVerdict};
