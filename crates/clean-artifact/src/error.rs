//! Artifact store error types.

use std::path::PathBuf;
use thiserror::Error;

use clean_model::{ArtifactName, ArtifactRef, ModelError};

#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Reference string could not be parsed.
    #[error("invalid artifact reference: {0}")]
    InvalidReference(#[from] ModelError),

    /// No version of the artifact exists.
    #[error("artifact not found: {name}")]
    NotFound { name: ArtifactName },

    /// The artifact exists but not at the requested version.
    #[error("artifact version not found: {reference}")]
    VersionNotFound { reference: ArtifactRef },

    /// Stored file no longer matches the digest in its manifest.
    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Source given to publish is not a regular file.
    #[error("cannot publish {path}: not a file")]
    NotAFile { path: PathBuf },

    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest or run record could not be (de)serialized.
    #[error("invalid metadata file {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ArtifactError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArtifactError>;
