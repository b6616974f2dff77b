//! Tracking runs.
//!
//! A [`RunContext`] is created when a job starts and finished when it ends.
//! It is passed explicitly to whatever needs to consume or produce artifacts
//! and collects the lineage (which versions were read, which were written)
//! that ends up in the run record.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use clean_model::{ArtifactRef, ArtifactSpec};

use crate::error::Result;
use crate::store::{ArtifactStore, PublishedArtifact, ResolvedArtifact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Finished,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One artifact version read or written by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactLink {
    pub artifact: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub sha256: String,
}

/// Persisted summary of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: String,
    pub job_type: String,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub config: serde_json::Value,
    #[serde(default)]
    pub used_artifacts: Vec<ArtifactLink>,
    #[serde(default)]
    pub logged_artifacts: Vec<ArtifactLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct RunContext<S: ArtifactStore> {
    store: S,
    record: RunRecord,
}

fn run_id(job_type: &str, started_at: DateTime<Utc>, config: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(job_type.as_bytes());
    hasher.update([0u8]);
    hasher.update(config.to_string().as_bytes());
    hasher.update([0u8]);
    hasher.update(
        started_at
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .to_le_bytes(),
    );
    let digest = hex::encode(hasher.finalize());
    format!("{}-{}", started_at.format("%Y%m%dT%H%M%S"), &digest[..8])
}

impl<S: ArtifactStore> RunContext<S> {
    /// Start a run, capturing the job configuration.
    pub fn init<C: Serialize>(store: S, job_type: impl Into<String>, config: &C) -> Result<Self> {
        let job_type = job_type.into();
        let config = serde_json::to_value(config).map_err(|source| {
            crate::error::ArtifactError::Metadata {
                path: PathBuf::from("<run config>"),
                source,
            }
        })?;
        let started_at = Utc::now();
        let id = run_id(&job_type, started_at, &config);
        info!(run_id = %id, job_type = %job_type, "run started");
        Ok(Self {
            store,
            record: RunRecord {
                id,
                job_type,
                status: RunStatus::Running,
                started_at,
                finished_at: None,
                config,
                used_artifacts: Vec::new(),
                logged_artifacts: Vec::new(),
                summary: None,
                error: None,
            },
        })
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve an input artifact and record it as consumed by this run.
    pub fn use_artifact(&mut self, reference: &ArtifactRef) -> Result<ResolvedArtifact> {
        let resolved = self.store.resolve(reference)?;
        self.record.used_artifacts.push(ArtifactLink {
            artifact: resolved.manifest.reference().to_string(),
            artifact_type: resolved.manifest.artifact_type.clone(),
            sha256: resolved.manifest.sha256.clone(),
        });
        Ok(resolved)
    }

    /// Publish an output file and record it as produced by this run.
    pub fn log_artifact(&mut self, spec: &ArtifactSpec, path: &Path) -> Result<PublishedArtifact> {
        let published = self.store.publish(spec, path)?;
        self.record.logged_artifacts.push(ArtifactLink {
            artifact: published.manifest.reference().to_string(),
            artifact_type: published.manifest.artifact_type.clone(),
            sha256: published.manifest.sha256.clone(),
        });
        Ok(published)
    }

    /// Attach a summary value (stage counts and similar) to the run record.
    pub fn set_summary<T: Serialize>(&mut self, summary: &T) {
        match serde_json::to_value(summary) {
            Ok(value) => self.record.summary = Some(value),
            Err(error) => warn!(%error, "run summary could not be serialized"),
        }
    }

    /// Close the run successfully.
    pub fn finish(self) -> Result<RunRecord> {
        self.close(RunStatus::Finished, None)
    }

    /// Close the run as failed with the error message that ended it.
    pub fn fail(self, error: impl fmt::Display) -> Result<RunRecord> {
        self.close(RunStatus::Failed, Some(error.to_string()))
    }

    fn close(mut self, status: RunStatus, error: Option<String>) -> Result<RunRecord> {
        self.record.status = status;
        self.record.error = error;
        self.record.finished_at = Some(Utc::now());
        let path = self.store.record_run(&self.record)?;
        info!(
            run_id = %self.record.id,
            status = %status,
            record = %path.display(),
            "run closed"
        );
        Ok(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalArtifactStore;
    use clean_model::ArtifactName;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn records_lineage_and_status() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path().join("store"));
        let raw = dir.path().join("sample.csv");
        fs::write(&raw, "price\n1\n").unwrap();
        let raw_spec = ArtifactSpec::new(ArtifactName::new("sample.csv").unwrap(), "raw_data", "raw");
        store.publish(&raw_spec, &raw).unwrap();

        let mut run = RunContext::init(store, "basic_cleaning", &json!({"min_price": 10})).unwrap();
        let resolved = run.use_artifact(&"sample.csv:latest".parse().unwrap()).unwrap();
        assert_eq!(resolved.manifest.version, 0);

        let out = dir.path().join("clean.csv");
        fs::write(&out, "price\n1\n").unwrap();
        let out_spec =
            ArtifactSpec::new(ArtifactName::new("clean.csv").unwrap(), "cleaned_data", "clean");
        run.log_artifact(&out_spec, &out).unwrap();
        run.set_summary(&json!({"rows": 1}));

        let run_id = run.id().to_string();
        let record = run.finish().unwrap();
        assert_eq!(record.status, RunStatus::Finished);
        assert_eq!(record.used_artifacts[0].artifact, "sample.csv:v0");
        assert_eq!(record.logged_artifacts[0].artifact, "clean.csv:v0");
        assert_eq!(record.config["min_price"], 10);

        let saved = dir.path().join("store").join("runs").join(format!("{run_id}.json"));
        let saved: RunRecord = serde_json::from_slice(&fs::read(saved).unwrap()).unwrap();
        assert_eq!(saved.status, RunStatus::Finished);
        assert_eq!(saved.summary, Some(json!({"rows": 1})));
    }

    #[test]
    fn failed_run_keeps_error_message() {
        let dir = tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path());
        let mut run = RunContext::init(store, "basic_cleaning", &json!({})).unwrap();
        assert!(run.use_artifact(&"missing.csv".parse().unwrap()).is_err());

        let record = run.fail("artifact not found: missing.csv").unwrap();
        assert_eq!(record.status, RunStatus::Failed);
        assert!(record.logged_artifacts.is_empty());
        assert_eq!(
            record.error.as_deref(),
            Some("artifact not found: missing.csv")
        );
    }
}
