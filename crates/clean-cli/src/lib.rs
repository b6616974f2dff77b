//! basic_cleaning job: resolve a raw listing artifact, clean it, publish the result.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use commands::{JOB_TYPE, run_cleaning, run_cleaning_with_store};
pub use pipeline::{CleanError, CleanOutcome, clean};
pub use types::CleaningResult;
