//! Error types for reading and writing the database file

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File-level failures. Malformed lines are not errors; see
/// [`LineRejection`](super::csv::LineRejection).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file exists but could not be opened
    #[error("could not open {} for {action}: {source}", .path.display())]
    Open {
        path: PathBuf,
        action: &'static str,
        source: io::Error,
    },

    #[error("error reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A write, flush or sync failed part way through a save
    #[error("error writing {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
