//! Per-line classification and tallying.

use crate::config::AnalysisConfig;
use crate::grammar::{self, LineMatch, VersionRecord};
use crate::histogram::{Field, FieldHistograms};
use crate::summary::{Category, RunSummary};

/// What a single line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Valid(VersionRecord<'a>),
    /// Valid only after dropping a leading `v`/`V`; `cleaned` is the remainder.
    NearMiss { cleaned: &'a str },
    Bad,
}

impl Classification<'_> {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Valid(_) => Category::Valid,
            Self::NearMiss { .. } => Category::NearMiss,
            Self::Bad => Category::Bad,
        }
    }
}

/// Classify `line` without recording anything.
#[must_use]
pub fn classify(line: &str) -> Classification<'_> {
    if let LineMatch::Matched(record) = grammar::match_line(line) {
        return Classification::Valid(record);
    }
    match line.strip_prefix(['v', 'V']) {
        Some(rest) if grammar::match_bare(rest).is_match() => {
            Classification::NearMiss { cleaned: rest }
        }
        _ => Classification::Bad,
    }
}

/// Number of `.` separators in a tag.
#[must_use]
pub fn separator_count(tag: &str) -> usize {
    tag.bytes().filter(|&b| b == b'.').count()
}

/// Accumulated state for one input.
#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalysisConfig,
    histograms: FieldHistograms,
    summary: RunSummary,
}

impl Analysis {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            histograms: FieldHistograms::new(&config),
            summary: RunSummary::new(),
            config,
        }
    }

    /// Classify `line` and fold it into the histograms and summary.
    ///
    /// Near misses and bad lines only touch the summary. The returned
    /// classification tells the caller which side output, if any, gets the line.
    pub fn ingest<'a>(&mut self, line: &'a str) -> Classification<'a> {
        let outcome = classify(line);
        if let Classification::Valid(record) = outcome {
            self.tally(&record);
        }
        self.summary
            .add_line(line.chars().count() as u64, outcome.category());
        outcome
    }

    fn tally(&mut self, record: &VersionRecord<'_>) {
        let weight = self.config.count_policy.weight(record.count);
        let h = &mut self.histograms;

        h.record(Field::Major, record.major.len(), weight);
        h.record(Field::Minor, record.minor.len(), weight);
        h.record(Field::Patch, record.patch.len(), weight);

        let prerelease = record.prerelease.unwrap_or_default();
        h.record(Field::Prerelease, prerelease.len(), weight);
        h.record(Field::PrereleaseFields, separator_count(prerelease), weight);

        let meta = record.build.unwrap_or_default();
        h.record(Field::Meta, meta.len(), weight);
        h.record(Field::MetaFields, separator_count(meta), weight);

        let s = &mut self.summary;
        s.versions = s.versions.saturating_add(weight);
        if record.prerelease.is_some() {
            s.with_prerelease = s.with_prerelease.saturating_add(weight);
        }
        if record.build.is_some() {
            s.with_meta = s.with_meta.saturating_add(weight);
        }
    }

    #[must_use]
    pub const fn histograms(&self) -> &FieldHistograms {
        &self.histograms
    }

    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }

    #[must_use]
    pub fn into_parts(self) -> (FieldHistograms, RunSummary) {
        (self.histograms, self.summary)
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
