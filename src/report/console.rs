// Console output helpers - clickable links and build-level notices

use std::path::Path;
use tracing::warn;
use url::Url;

/// Format `path` as a `file://` URL terminals can open.
///
/// Relative paths are resolved against the current directory first. Paths that
/// cannot be expressed as a URL fall back to their display form.
pub fn clickable_file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match Url::from_file_path(&absolute) {
        Ok(url) => url.to_string(),
        Err(()) => absolute.display().to_string(),
    }
}

/// Announce the aggregate report at warning level and return the message.
pub fn announce_aggregate(report: &Path) -> String {
    let message = format!("Aggregate test results: {}", clickable_file_url(report));
    warn!("{}", message);
    message
}
