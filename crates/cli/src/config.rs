// crates/cli/src/config.rs
use crate::args::Args;
use semver_stats_core::AnalysisConfig;
pub use semver_stats_engine::config::{RunConfig, RunConfigBuilder};

impl From<&Args> for RunConfig {
    fn from(args: &Args) -> Self {
        let analysis = AnalysisConfig {
            numeric_width: args.numeric_width,
            tag_width: args.tag_width,
            count_policy: args.count_policy.into(),
            overflow_weighting: args.overflow_weighting.into(),
        };

        RunConfigBuilder::default()
            .inputs(args.inputs.clone())
            .input_dir(args.input_dir.clone())
            .extensions(args.ext.clone())
            .output_dir(args.output_dir.clone())
            .analysis(analysis)
            .dense_rows(args.dense)
            .reprocess_near_misses(!args.no_reprocess)
            .threads(args.jobs.unwrap_or_else(num_cpus::get))
            .strict(args.strict)
            .build()
            .expect("every RunConfig field is set or defaulted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use semver_stats_core::{CountPolicy, OverflowWeighting};
    use std::path::PathBuf;

    #[test]
    fn test_args_map_onto_run_config() {
        let args = Args::try_parse_from([
            "semver_stats",
            "--numeric-width",
            "8",
            "--count-policy",
            "literal",
            "--overflow-weighting",
            "weighted",
            "--no-reprocess",
            "-j",
            "3",
            "-o",
            "out",
            "a.txt",
        ])
        .unwrap();
        let config = RunConfig::from(&args);
        assert_eq!(config.analysis.numeric_width, 8);
        assert_eq!(config.analysis.tag_width, 100);
        assert_eq!(config.analysis.count_policy, CountPolicy::Literal);
        assert_eq!(config.analysis.overflow_weighting, OverflowWeighting::Weighted);
        assert!(!config.reprocess_near_misses);
        assert_eq!(config.threads, 3);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.inputs, vec![PathBuf::from("a.txt")]);
    }
}
