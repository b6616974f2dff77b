//! CLI argument definitions for the cleaning job.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "basic-cleaning",
    version,
    about = "A very basic data cleaning",
    long_about = "Download a raw listing artifact, drop price and location outliers,\n\
                  normalize review dates, and publish the result as a new artifact."
)]
pub struct Cli {
    #[command(flatten)]
    pub job: JobArgs,

    /// Root directory of the local artifact store.
    #[arg(long = "artifact-root", value_name = "DIR", default_value = "artifacts")]
    pub artifact_root: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Job parameters. These are recorded verbatim as the run configuration.
#[derive(Args, Debug, Clone, Serialize)]
pub struct JobArgs {
    /// Name of the artifact which needs to be preprocessed.
    #[arg(long = "input_artifact", value_name = "NAME[:VERSION]")]
    pub input_artifact: String,

    /// Name of the artifact which is cleaned.
    #[arg(long = "output_artifact", value_name = "NAME")]
    pub output_artifact: String,

    /// Type of the output artifact (e.g. cleaned_data).
    #[arg(long = "output_type")]
    pub output_type: String,

    /// Description of the cleaned data.
    #[arg(long = "output_description")]
    pub output_description: String,

    /// Minimum price to keep.
    #[arg(long = "min_price", allow_negative_numbers = true)]
    pub min_price: i64,

    /// Maximum price to keep.
    #[arg(long = "max_price", allow_negative_numbers = true)]
    pub max_price: i64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 13] = [
        "basic-cleaning",
        "--input_artifact",
        "sample.csv:latest",
        "--output_artifact",
        "clean_sample.csv",
        "--output_type",
        "cleaned_data",
        "--output_description",
        "Data with outliers removed",
        "--min_price",
        "10",
        "--max_price",
        "350",
    ];

    #[test]
    fn parses_required_flags() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();
        assert_eq!(cli.job.input_artifact, "sample.csv:latest");
        assert_eq!(cli.job.output_artifact, "clean_sample.csv");
        assert_eq!(cli.job.min_price, 10);
        assert_eq!(cli.job.max_price, 350);
        assert_eq!(cli.artifact_root, PathBuf::from("artifacts"));
    }

    #[test]
    fn every_job_flag_is_required() {
        for flag in [
            "--input_artifact",
            "--output_artifact",
            "--output_type",
            "--output_description",
            "--min_price",
            "--max_price",
        ] {
            let position = REQUIRED.iter().position(|arg| *arg == flag).unwrap();
            let args: Vec<&str> = REQUIRED
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != position && *idx != position + 1)
                .map(|(_, arg)| *arg)
                .collect();
            assert!(Cli::try_parse_from(args).is_err(), "{flag} should be required");
        }
    }

    #[test]
    fn prices_must_be_integers() {
        let mut args = REQUIRED.to_vec();
        args[10] = "ten";
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
