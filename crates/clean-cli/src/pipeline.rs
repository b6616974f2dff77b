//! The cleaning transform as a single callable stage.
//!
//! `clean` owns the file boundary: load, apply the rules, write. It knows
//! nothing about artifacts; `commands` wraps it with resolution and
//! publishing.

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{info, info_span};

use clean_artifact::ArtifactError;
use clean_ingest::{IngestError, read_listings};
use clean_model::{CleaningStats, PriceRange};
use clean_output::{OutputError, write_listings};
use clean_transform::{TransformError, clean_listings};

/// Failure taxonomy of the cleaning job. Every variant is fatal.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A required column is absent from the input header.
    #[error("schema error: {0}")]
    Schema(#[source] IngestError),

    /// The input artifact could not be resolved, opened, or parsed.
    #[error("input not found: {0}")]
    InputNotFound(String, #[source] Box<dyn std::error::Error + Send + Sync>),

    /// The cleaned file could not be written.
    #[error("output write error: {0}")]
    OutputWrite(#[source] OutputError),

    /// The rules could not be applied to the loaded frame.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// The written file could not be registered as an artifact.
    #[error("publish error: {0}")]
    Publish(#[source] ArtifactError),
}

impl From<IngestError> for CleanError {
    fn from(error: IngestError) -> Self {
        if error.is_schema_error() {
            Self::Schema(error)
        } else {
            Self::InputNotFound(error.to_string(), Box::new(error))
        }
    }
}

impl From<OutputError> for CleanError {
    fn from(error: OutputError) -> Self {
        Self::OutputWrite(error)
    }
}

impl CleanError {
    /// Input resolution failures from the artifact store.
    pub fn unresolved(error: ArtifactError) -> Self {
        Self::InputNotFound(error.to_string(), Box::new(error))
    }
}

/// Result of a successful cleaning pass.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub output_path: PathBuf,
    pub stats: CleaningStats,
}

/// Clean the listings at `input` and write them to `output`.
///
/// Nothing is written unless every earlier step succeeded.
pub fn clean(input: &Path, output: &Path, price: PriceRange) -> Result<CleanOutcome, CleanError> {
    let span = info_span!("clean", input = %input.display(), output = %output.display());
    let _guard = span.enter();
    let started = Instant::now();

    let table = read_listings(input)?;
    let mut cleaned = clean_listings(table, price)?;

    info!(path = %output.display(), "save the results to a CSV file");
    let output_path = write_listings(&mut cleaned.data, output)?;
    info!(
        rows = cleaned.stats.output_rows(),
        dropped = cleaned.stats.dropped_rows(),
        duration_ms = started.elapsed().as_millis(),
        "clean complete"
    );
    Ok(CleanOutcome {
        output_path,
        stats: cleaned.stats,
    })
}
