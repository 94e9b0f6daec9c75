use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised when the durable snapshot cannot be read or written.
///
/// Callers log and swallow these: a failed save never aborts the request
/// that triggered it and never crashes the process.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem-level read or write failure.
    #[error("storage io failure on {path}")]
    Io {
        /// Snapshot file involved.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: io::Error,
    },
    /// Snapshot could not be serialized or parsed.
    #[error("storage codec failure on {path}")]
    Codec {
        /// Snapshot file involved.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
