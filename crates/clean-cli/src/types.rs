use std::path::PathBuf;

use clean_artifact::ArtifactManifest;
use clean_model::CleaningStats;

#[derive(Debug)]
pub struct CleaningResult {
    pub run_id: String,
    /// Concrete `name:vN` of the consumed input.
    pub input_artifact: String,
    pub output_path: PathBuf,
    pub stats: CleaningStats,
    pub published: ArtifactManifest,
    /// False when the output matched the latest published version.
    pub new_version: bool,
}
