/// Error types for the politician directory.
///
/// Only failures to load the source dataset are surfaced. Per-row anomalies
/// (empty rows, unresolvable states, out-of-range pages) are absorbed by the
/// pipeline and never reach the caller.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read source {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
