use std::path::{Path, PathBuf};

use tracing::{error, info, info_span, warn};

use clean_artifact::{ArtifactError, ArtifactStore, LocalArtifactStore, RunContext};
use clean_model::{ArtifactName, ArtifactRef, ArtifactSpec, PriceRange};

use crate::cli::JobArgs;
use crate::pipeline::{CleanError, clean};
use crate::types::CleaningResult;

pub const JOB_TYPE: &str = "basic_cleaning";

/// Everything derived from the job flags before any I/O happens.
struct JobPlan {
    input: ArtifactRef,
    output_path: PathBuf,
    spec: ArtifactSpec,
    price: PriceRange,
}

fn plan(args: &JobArgs) -> Result<JobPlan, CleanError> {
    let input: ArtifactRef = args
        .input_artifact
        .parse()
        .map_err(|e| CleanError::unresolved(ArtifactError::InvalidReference(e)))?;

    let output_path = PathBuf::from(&args.output_artifact);
    let file_name = output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = ArtifactName::new(file_name)
        .map_err(|e| CleanError::Publish(ArtifactError::InvalidReference(e)))?;

    Ok(JobPlan {
        input,
        output_path,
        spec: ArtifactSpec::new(name, &args.output_type, &args.output_description),
        price: PriceRange::new(args.min_price, args.max_price),
    })
}

/// Run the cleaning job against the local store at `artifact_root`.
pub fn run_cleaning(args: &JobArgs, artifact_root: &Path) -> Result<CleaningResult, CleanError> {
    let store = LocalArtifactStore::new(artifact_root);
    run_cleaning_with_store(args, store)
}

/// Run the cleaning job against any artifact store.
///
/// The run is always closed: finished on success, failed otherwise. A
/// failed run never publishes the output.
pub fn run_cleaning_with_store<S: ArtifactStore>(
    args: &JobArgs,
    store: S,
) -> Result<CleaningResult, CleanError> {
    let plan = plan(args)?;
    let mut run = RunContext::init(store, JOB_TYPE, args).map_err(CleanError::Publish)?;
    let span = info_span!("run", run_id = %run.id(), job_type = JOB_TYPE);
    let _guard = span.enter();

    match execute(&mut run, &plan) {
        Ok(result) => {
            run.finish().map_err(CleanError::Publish)?;
            Ok(result)
        }
        Err(err) => {
            error!(error = %err, "run failed");
            if let Err(close_error) = run.fail(&err) {
                warn!(error = %close_error, "failed run could not be recorded");
            }
            Err(err)
        }
    }
}

fn execute<S: ArtifactStore>(
    run: &mut RunContext<S>,
    plan: &JobPlan,
) -> Result<CleaningResult, CleanError> {
    info!(artifact = %plan.input, "download artifact");
    let resolved = run
        .use_artifact(&plan.input)
        .map_err(CleanError::unresolved)?;

    let outcome = clean(&resolved.path, &plan.output_path, plan.price)?;
    run.set_summary(&outcome.stats);

    info!(artifact = %plan.spec.name, "log artifact");
    let published = run
        .log_artifact(&plan.spec, &outcome.output_path)
        .map_err(CleanError::Publish)?;

    Ok(CleaningResult {
        run_id: run.id().to_string(),
        input_artifact: resolved.manifest.reference().to_string(),
        output_path: outcome.output_path,
        stats: outcome.stats,
        published: published.manifest,
        new_version: published.created,
    })
}
