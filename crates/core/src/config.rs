use serde::{Deserialize, Serialize};

/// Default histogram width for every field.
pub const DEFAULT_WIDTH: usize = 100;

/// How an explicit repetition count turns into a record weight.
///
/// A line without a count field always weighs 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountPolicy {
    /// `max(count, 1)`: an explicit zero still counts as one occurrence.
    #[default]
    ZeroAsOne,
    /// The count as written; an explicit zero adds nothing.
    Literal,
}

impl CountPolicy {
    #[must_use]
    pub fn weight(self, count: Option<u64>) -> u64 {
        match (self, count) {
            (_, None) => 1,
            (Self::ZeroAsOne, Some(n)) => n.max(1),
            (Self::Literal, Some(n)) => n,
        }
    }
}

/// What an out-of-range value adds to a field's overflow counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowWeighting {
    /// One per overflowing record, regardless of its count.
    #[default]
    PerOccurrence,
    /// The record weight, like an in-range bucket.
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Width of the major/minor/patch length histograms.
    pub numeric_width: usize,
    /// Width of the prerelease/meta length and sub-field histograms.
    pub tag_width: usize,
    pub count_policy: CountPolicy,
    pub overflow_weighting: OverflowWeighting,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            numeric_width: DEFAULT_WIDTH,
            tag_width: DEFAULT_WIDTH,
            count_policy: CountPolicy::default(),
            overflow_weighting: OverflowWeighting::default(),
        }
    }
}
