use clap::ValueEnum;
use log::LevelFilter;
use semver_stats_core::{CountPolicy, OverflowWeighting};
use serde::{Deserialize, Serialize};

/// Console rendering of the per-file summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum CountPolicyArg {
    /// An explicit count of 0 still counts once
    #[default]
    ZeroAsOne,
    /// Use explicit counts as written, including 0
    Literal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OverflowWeightingArg {
    /// Overflow counters count records
    #[default]
    PerOccurrence,
    /// Overflow counters add the record's count
    Weighted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const LEVELS: [LevelFilter; 5] = [
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    /// Shift this level by `-v`/`-q` counts, clamped to the known levels.
    #[must_use]
    pub fn adjusted(self, verbose: u8, quiet: u8) -> LevelFilter {
        let base = self as i16;
        let idx = (base + i16::from(verbose) - i16::from(quiet)).clamp(0, 4);
        Self::LEVELS[usize::try_from(idx).unwrap_or(1)]
    }
}

impl From<CountPolicyArg> for CountPolicy {
    fn from(arg: CountPolicyArg) -> Self {
        match arg {
            CountPolicyArg::ZeroAsOne => Self::ZeroAsOne,
            CountPolicyArg::Literal => Self::Literal,
        }
    }
}

impl From<OverflowWeightingArg> for OverflowWeighting {
    fn from(arg: OverflowWeightingArg) -> Self {
        match arg {
            OverflowWeightingArg::PerOccurrence => Self::PerOccurrence,
            OverflowWeightingArg::Weighted => Self::Weighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_adjustment() {
        assert_eq!(LogLevel::Warn.adjusted(0, 0), LevelFilter::Warn);
        assert_eq!(LogLevel::Warn.adjusted(2, 0), LevelFilter::Debug);
        assert_eq!(LogLevel::Warn.adjusted(9, 0), LevelFilter::Trace);
        assert_eq!(LogLevel::Info.adjusted(0, 5), LevelFilter::Error);
    }
}
