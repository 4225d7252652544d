//! Error types for the inspection run.

use std::io;
use std::path::PathBuf;

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors that abort an inspection run.
///
/// Malformed file contents are never an error: the extractors fall back to
/// "not available" values instead. Only inaccessible sources and a broken
/// output stream end the run.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// A procfs file or directory could not be opened, read or listed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the report failed (for example, a closed stdout pipe).
    #[error("failed to write report: {0}")]
    Write(#[source] io::Error),
}

impl InspectError {
    /// Wraps an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
