//! Output error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Frame could not be rendered as CSV.
    #[error("failed to serialize CSV for {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file written but could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    /// The destination the failed write was aimed at.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Serialize { path, .. } | Self::Io { path, .. } => path,
            Self::AtomicWriteFailed { target_path, .. } => target_path,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
