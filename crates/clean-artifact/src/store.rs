//! Artifact store interface.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clean_model::{ArtifactName, ArtifactRef, ArtifactSpec, ArtifactVersion};

use crate::error::Result;
use crate::run::RunRecord;

/// Metadata stored next to every artifact version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub name: ArtifactName,
    pub version: u32,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub description: String,
    pub file_name: String,
    pub sha256: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl ArtifactManifest {
    /// Concrete `name:vN` reference for this version.
    pub fn reference(&self) -> ArtifactRef {
        ArtifactRef {
            name: self.name.clone(),
            version: ArtifactVersion::Number(self.version),
        }
    }
}

/// An artifact version materialized as a local file.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub manifest: ArtifactManifest,
    pub path: PathBuf,
}

/// Outcome of publishing a file.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedArtifact {
    pub manifest: ArtifactManifest,
    /// False when identical content was already the latest version.
    pub created: bool,
}

/// Versioned, content-addressed storage for data files, plus the run log
/// that records which versions each job consumed and produced.
pub trait ArtifactStore {
    /// Resolve a reference to a verified local file.
    fn resolve(&self, reference: &ArtifactRef) -> Result<ResolvedArtifact>;

    /// Register `source` as the next version of `spec.name`.
    fn publish(&self, spec: &ArtifactSpec, source: &Path) -> Result<PublishedArtifact>;

    /// Persist a finished run record, returning where it was written.
    fn record_run(&self, record: &RunRecord) -> Result<PathBuf>;
}
