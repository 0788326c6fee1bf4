//! CLI argument definitions for the HiTOP pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use hitop_ingest::DataType;

#[derive(Parser)]
#[command(
    name = "hitop",
    version,
    about = "HiTOP questionnaire pipeline - partition answers and score spectra",
    long_about = "Process pre/post therapy questionnaire exports.\n\n\
                  Labels answer columns from the variable metadata, splits them by \n\
                  questionnaire, resolves the annotated HiTOP mapping and computes \n\
                  per-patient spectrum scores."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List questionnaires with column and answer counts.
    Questionnaires(QuestionnairesArgs),

    /// Show the resolved spectrum dictionary.
    Spectra(SpectraArgs),

    /// Compute per-patient spectrum scores from the standardized dataset.
    Scores(ScoresArgs),
}

/// Location of the study data.
#[derive(Args)]
pub struct DataArgs {
    /// Directory containing `data/raw` and `data/processed`.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,
}

#[derive(Args)]
pub struct QuestionnairesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Dataset variant: raw/original, standardized, processed/sampled.
    #[arg(
        long = "data-type",
        value_name = "TYPE",
        default_value = "sampled",
        value_parser = parse_data_type
    )]
    pub data_type: DataType,
}

#[derive(Args)]
pub struct SpectraArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// HiTOP mapping table (default: <DIR>/data/raw/hitop_mapping.csv).
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// List the codes of every spectrum.
    #[arg(long = "codes")]
    pub codes: bool,
}

#[derive(Args)]
pub struct ScoresArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// HiTOP mapping table (default: <DIR>/data/raw/hitop_mapping.csv).
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Write the score table to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Patient identifier column; when set, only it and the score columns are written.
    #[arg(long = "id-column", value_name = "COLUMN")]
    pub id_column: Option<String>,

    /// Prefix of the standardized item columns.
    #[arg(long = "z-prefix", value_name = "PREFIX", default_value = "z_")]
    pub z_prefix: String,
}

fn parse_data_type(value: &str) -> Result<DataType, String> {
    value.parse().map_err(|error| format!("{error}"))
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
