// Events module - Reporters that receive test events for a run

pub mod group;
pub mod root;

pub use group::{GROUP_PATH_SEPARATOR, GroupEventReporter, GroupStatus};
pub use root::{RootEventReporter, RunServices};
