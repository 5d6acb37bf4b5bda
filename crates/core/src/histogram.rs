//! Bounded histograms of field lengths and sub-field counts.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::config::{AnalysisConfig, OverflowWeighting};

/// Where a recorded value landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Bucket(usize),
    Overflow,
}

/// Counters for indices `0..width` plus a single overflow counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    buckets: Vec<u64>,
    overflow: u64,
}

impl Histogram {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            buckets: vec![0; width],
            overflow: 0,
        }
    }

    /// Number of in-range buckets.
    #[must_use]
    pub fn width(&self) -> usize {
        self.buckets.len()
    }

    /// Add `weight` at `index`, or bump the overflow counter by
    /// `overflow_weight` when `index` is outside the table.
    pub fn record(&mut self, index: usize, weight: u64, overflow_weight: u64) -> Slot {
        match self.buckets.get_mut(index) {
            Some(bucket) => {
                *bucket = bucket.saturating_add(weight);
                Slot::Bucket(index)
            }
            None => {
                self.overflow = self.overflow.saturating_add(overflow_weight);
                Slot::Overflow
            }
        }
    }

    /// Bucket value, `None` past the width.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.buckets.get(index).copied()
    }

    #[must_use]
    pub const fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Sum of all buckets including overflow.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets
            .iter()
            .fold(self.overflow, |acc, &v| acc.saturating_add(v))
    }

    /// Pairwise addition. The result is as wide as the wider operand.
    pub fn merge(&mut self, other: &Self) {
        if other.buckets.len() > self.buckets.len() {
            self.buckets.resize(other.buckets.len(), 0);
        }
        for (mine, theirs) in self.buckets.iter_mut().zip(&other.buckets) {
            *mine = mine.saturating_add(*theirs);
        }
        self.overflow = self.overflow.saturating_add(other.overflow);
    }
}

impl AddAssign<&Self> for Histogram {
    fn add_assign(&mut self, rhs: &Self) {
        self.merge(rhs);
    }
}

/// The tracked columns, in counts-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Prerelease,
    PrereleaseFields,
    Meta,
    MetaFields,
}

impl Field {
    pub const ALL: [Self; 7] = [
        Self::Major,
        Self::Minor,
        Self::Patch,
        Self::Prerelease,
        Self::PrereleaseFields,
        Self::Meta,
        Self::MetaFields,
    ];

    /// Column heading used in the counts table.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Patch => "Patch",
            Self::Prerelease => "Prerelease",
            Self::PrereleaseFields => "PrereleaseFields",
            Self::Meta => "Meta",
            Self::MetaFields => "MetaFields",
        }
    }

    /// Major, minor and patch share the numeric width.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Major | Self::Minor | Self::Patch)
    }

    const fn position(self) -> usize {
        self as usize
    }
}

/// One row of the counts table. `None` marks a column whose histogram is
/// narrower than `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountsRow {
    pub index: usize,
    pub values: [Option<u64>; 7],
}

impl CountsRow {
    fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.unwrap_or(0) == 0)
    }
}

/// Per-field histograms for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldHistograms {
    fields: [Histogram; 7],
    overflow_weighting: OverflowWeighting,
}

impl FieldHistograms {
    #[must_use]
    pub fn new(config: &AnalysisConfig) -> Self {
        let fields = Field::ALL.map(|field| {
            Histogram::new(if field.is_numeric() {
                config.numeric_width
            } else {
                config.tag_width
            })
        });
        Self {
            fields,
            overflow_weighting: config.overflow_weighting,
        }
    }

    /// Record `index` for `field` with the given record weight.
    pub fn record(&mut self, field: Field, index: usize, weight: u64) -> Slot {
        let overflow_weight = match self.overflow_weighting {
            OverflowWeighting::PerOccurrence => 1,
            OverflowWeighting::Weighted => weight,
        };
        self.fields[field.position()].record(index, weight, overflow_weight)
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &Histogram {
        &self.fields[field.position()]
    }

    /// Overflow counters in column order.
    #[must_use]
    pub fn overflows(&self) -> [u64; 7] {
        Field::ALL.map(|field| self.get(field).overflow())
    }

    /// Number of rows spanned by the widest histogram.
    #[must_use]
    pub fn row_span(&self) -> usize {
        self.fields.iter().map(Histogram::width).max().unwrap_or(0)
    }

    /// Rows with at least one non-zero value, plus the index 0 anchor row.
    ///
    /// The iterator borrows the histograms; call again to restart.
    pub fn rows(&self) -> impl Iterator<Item = CountsRow> + '_ {
        self.rows_dense()
            .filter(|row| row.index == 0 || !row.is_empty())
    }

    /// Every row in `0..row_span()`.
    pub fn rows_dense(&self) -> impl Iterator<Item = CountsRow> + '_ {
        (0..self.row_span()).map(move |index| CountsRow {
            index,
            values: Field::ALL.map(|field| self.get(field).get(index)),
        })
    }

    pub fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.fields.iter_mut().zip(&other.fields) {
            mine.merge(theirs);
        }
    }
}

impl AddAssign<&Self> for FieldHistograms {
    fn add_assign(&mut self, rhs: &Self) {
        self.merge(rhs);
    }
}
