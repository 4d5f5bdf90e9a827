//! Error types for recording ingestion

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading a replay export from disk.
///
/// Malformed lines are not errors; the parser skips them. A truncated
/// recording yields a partial aggregate.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to read recording {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
