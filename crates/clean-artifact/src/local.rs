//! Filesystem-backed artifact store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<name>/v0/manifest.json
//! <root>/<name>/v0/<file>
//! <root>/<name>/v1/...
//! <root>/runs/<run-id>.json
//! ```
//!
//! Versions are staged in a hidden sibling directory and renamed into place,
//! so a version directory is either complete or absent.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use clean_model::{ArtifactName, ArtifactRef, ArtifactSpec, ArtifactVersion};

use crate::error::{ArtifactError, Result};
use crate::hash::{compute_file_sha256, verify_sha256};
use crate::run::RunRecord;
use crate::store::{ArtifactManifest, ArtifactStore, PublishedArtifact, ResolvedArtifact};

const MANIFEST_FILE: &str = "manifest.json";
const RUNS_DIR: &str = "runs";

#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_dir(&self, name: &ArtifactName) -> PathBuf {
        self.root.join(name.as_str())
    }

    fn version_dir(&self, name: &ArtifactName, version: u32) -> PathBuf {
        self.artifact_dir(name).join(format!("v{version}"))
    }

    /// Published version numbers of `name`, ascending.
    pub fn versions(&self, name: &ArtifactName) -> Result<Vec<u32>> {
        let dir = self.artifact_dir(name);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ArtifactError::io("list", dir, e)),
        };
        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ArtifactError::io("list", &dir, e))?;
            let file_name = entry.file_name();
            let Some(number) = file_name
                .to_str()
                .and_then(|s| s.strip_prefix('v'))
                .and_then(|digits| digits.parse::<u32>().ok())
            else {
                continue;
            };
            if entry.path().join(MANIFEST_FILE).is_file() {
                versions.push(number);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    fn latest_version(&self, name: &ArtifactName) -> Result<Option<u32>> {
        Ok(self.versions(name)?.last().copied())
    }

    /// Read the manifest of a concrete version.
    pub fn manifest(&self, name: &ArtifactName, version: u32) -> Result<ArtifactManifest> {
        let path = self.version_dir(name, version).join(MANIFEST_FILE);
        let bytes = fs::read(&path).map_err(|e| ArtifactError::io("read", &path, e))?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Metadata { path, source })
    }

    fn stage_version(
        &self,
        manifest: &ArtifactManifest,
        source: &Path,
    ) -> Result<PathBuf> {
        let artifact_dir = self.artifact_dir(&manifest.name);
        let staging = artifact_dir.join(format!(".v{}.staging", manifest.version));
        if staging.exists() {
            fs::remove_dir_all(&staging)
                .map_err(|e| ArtifactError::io("clear staging directory", &staging, e))?;
        }
        fs::create_dir_all(&staging)
            .map_err(|e| ArtifactError::io("create directory", &staging, e))?;

        let staged_file = staging.join(&manifest.file_name);
        fs::copy(source, &staged_file).map_err(|e| ArtifactError::io("copy", source, e))?;
        write_json(&staging.join(MANIFEST_FILE), manifest)?;

        let final_dir = self.version_dir(&manifest.name, manifest.version);
        fs::rename(&staging, &final_dir).map_err(|e| {
            let _ = fs::remove_dir_all(&staging);
            ArtifactError::io("finalize version", &final_dir, e)
        })?;
        Ok(final_dir)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| ArtifactError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(|e| ArtifactError::io("write", path, e))
}

impl ArtifactStore for LocalArtifactStore {
    fn resolve(&self, reference: &ArtifactRef) -> Result<ResolvedArtifact> {
        let version = match reference.version {
            ArtifactVersion::Latest => {
                self.latest_version(&reference.name)?
                    .ok_or_else(|| ArtifactError::NotFound {
                        name: reference.name.clone(),
                    })?
            }
            ArtifactVersion::Number(n) => {
                let versions = self.versions(&reference.name)?;
                if versions.is_empty() {
                    return Err(ArtifactError::NotFound {
                        name: reference.name.clone(),
                    });
                }
                if !versions.contains(&n) {
                    return Err(ArtifactError::VersionNotFound {
                        reference: reference.clone(),
                    });
                }
                n
            }
        };

        let manifest = self.manifest(&reference.name, version)?;
        let path = self
            .version_dir(&reference.name, version)
            .join(&manifest.file_name);
        verify_sha256(&path, &manifest.sha256)?;
        info!(
            artifact = %manifest.reference(),
            path = %path.display(),
            "artifact resolved"
        );
        Ok(ResolvedArtifact { manifest, path })
    }

    fn publish(&self, spec: &ArtifactSpec, source: &Path) -> Result<PublishedArtifact> {
        let metadata = fs::metadata(source).map_err(|e| ArtifactError::io("stat", source, e))?;
        if !metadata.is_file() {
            return Err(ArtifactError::NotAFile {
                path: source.to_path_buf(),
            });
        }
        let sha256 = compute_file_sha256(source)?;

        let latest = self.latest_version(&spec.name)?;
        if let Some(version) = latest {
            let current = self.manifest(&spec.name, version)?;
            if current.sha256 == sha256 {
                info!(
                    artifact = %current.reference(),
                    "content unchanged; reusing latest version"
                );
                return Ok(PublishedArtifact {
                    manifest: current,
                    created: false,
                });
            }
        }

        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| spec.name.to_string());
        let manifest = ArtifactManifest {
            name: spec.name.clone(),
            version: latest.map_or(0, |v| v + 1),
            artifact_type: spec.artifact_type.clone(),
            description: spec.description.clone(),
            file_name,
            sha256,
            size_bytes: metadata.len(),
            created_at: Utc::now(),
        };
        let dir = self.stage_version(&manifest, source)?;
        debug!(dir = %dir.display(), "version directory finalized");
        info!(
            artifact = %manifest.reference(),
            artifact_type = %manifest.artifact_type,
            sha256 = %manifest.sha256,
            "artifact published"
        );
        Ok(PublishedArtifact {
            manifest,
            created: true,
        })
    }

    fn record_run(&self, record: &RunRecord) -> Result<PathBuf> {
        let dir = self.root.join(RUNS_DIR);
        fs::create_dir_all(&dir).map_err(|e| ArtifactError::io("create directory", &dir, e))?;
        let path = dir.join(format!("{}.json", record.id));
        write_json(&path, record)?;
        debug!(path = %path.display(), "run record written");
        Ok(path)
    }
}
