// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::options::{CountPolicyArg, LogLevel, OutputFormat, OverflowWeightingArg};
use crate::parsers::{parse_positive_usize, parse_width};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "semver_stats",
    version = crate::VERSION,
    about = "Distributions of SemVer field lengths and tag sub-field counts",
    long_about = "Reads files of `<count>,<semver>` or `<semver>` lines and writes, per input, \
                  a counts table (CSV), the bad lines, the cleaned near misses ('v'-prefixed \
                  versions) and a summary report. Near-miss files are processed again as inputs."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Input files
    #[arg(value_hint = ValueHint::FilePath, help_heading = "Input")]
    pub inputs: Vec<PathBuf>,

    /// Also process every file directly inside this directory
    #[arg(long, short = 'i', value_hint = ValueHint::DirPath, help_heading = "Input")]
    pub input_dir: Option<PathBuf>,

    /// Only pick up these extensions from --input-dir (comma separated / repeatable)
    #[arg(long, value_delimiter = ',', requires = "input_dir", help_heading = "Input")]
    pub ext: Vec<String>,

    /// Directory receiving the artifacts (created if missing)
    #[arg(long, short = 'o', default_value = ".", value_hint = ValueHint::DirPath, help_heading = "Output")]
    pub output_dir: PathBuf,

    /// Console format of the per-file summaries
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "Output")]
    pub format: OutputFormat,

    /// Write every row of the counts table, including all-zero rows
    #[arg(long, help_heading = "Output")]
    pub dense: bool,

    /// Histogram width for major/minor/patch lengths
    #[arg(long, default_value = "100", value_parser = parse_width, help_heading = "Histograms")]
    pub numeric_width: usize,

    /// Histogram width for prerelease/meta lengths and sub-field counts
    #[arg(long, default_value = "100", value_parser = parse_width, help_heading = "Histograms")]
    pub tag_width: usize,

    /// How an explicit record count weighs into the histograms
    #[arg(long, value_enum, default_value_t = CountPolicyArg::ZeroAsOne, help_heading = "Histograms")]
    pub count_policy: CountPolicyArg,

    /// What an out-of-range value adds to a field's overflow counter
    #[arg(long, value_enum, default_value_t = OverflowWeightingArg::PerOccurrence, help_heading = "Histograms")]
    pub overflow_weighting: OverflowWeightingArg,

    /// Do not process the generated near-miss files
    #[arg(long, help_heading = "Behavior")]
    pub no_reprocess: bool,

    /// Abort on the first file that fails
    #[arg(long, help_heading = "Behavior")]
    pub strict: bool,

    /// Number of files processed in parallel (default: number of CPUs)
    #[arg(long, short = 'j', value_parser = parse_positive_usize, help_heading = "Behavior")]
    pub jobs: Option<usize>,

    /// Wait for Enter before exiting
    #[arg(long, help_heading = "Behavior")]
    pub pause: bool,

    /// Base log level (-v / -q adjust relative to this level)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true, help_heading = "Logging")]
    pub log_level: LogLevel,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging")]
    pub verbose: u8,

    /// Decrease logging verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging")]
    pub quiet: u8,
}
