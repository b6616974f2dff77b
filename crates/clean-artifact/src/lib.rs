//! Artifact storage and run tracking.
//!
//! Artifacts are named, immutable, versioned files. A store resolves
//! `name[:version]` references to local files and registers new files as
//! versions; a run ties the versions a job read to the versions it wrote.

pub mod error;
pub mod hash;
pub mod local;
pub mod run;
pub mod store;

pub use error::{ArtifactError, Result};
pub use hash::{compute_file_sha256, verify_sha256};
pub use local::LocalArtifactStore;
pub use run::{ArtifactLink, RunContext, RunRecord, RunStatus};
pub use store::{ArtifactManifest, ArtifactStore, PublishedArtifact, ResolvedArtifact};
