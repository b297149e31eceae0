// Commands module - handles CLI command execution

pub mod finalize;
pub mod render;

pub use finalize::{BuildReport, finalize_runs, handle_finalize};
pub use render::handle_render;
