//! Text renderings of a finished run: the counts table and the summary report.

use crate::artifacts::ArtifactPaths;
use chrono::{DateTime, Local, Utc};
use semver_stats_core::{CountsRow, Field, FieldHistograms, RunSummary};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

pub const COUNTS_HEADER: &str = "Char Count,Major,Minor,Patch,Prerelease,PrereleaseFields,Meta,MetaFields";

/// Byte sizes of the committed artifacts, as reported in the summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactSizes {
    pub counts: u64,
    pub bad_lines: u64,
    pub near_miss: u64,
}

/// Result of processing one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    /// Last modification time of the input, when the filesystem reports one.
    pub input_modified: Option<DateTime<Utc>>,
    /// 0 for inputs given by the user, 1 for re-queued near-miss files.
    pub pass: usize,
    pub generated_at: DateTime<Local>,
    pub artifacts: ArtifactPaths,
    pub sizes: ArtifactSizes,
    pub summary: RunSummary,
    #[serde(skip)]
    pub histograms: FieldHistograms,
}

/// Render the counts table as CSV.
///
/// Columns narrower than a row's index print `x`. The last row carries the
/// overflow counters.
#[must_use]
pub fn render_counts(histograms: &FieldHistograms, dense: bool) -> String {
    let mut out = String::with_capacity(64 * 16);
    out.push_str(COUNTS_HEADER);
    out.push('\n');

    let mut push_row = |row: CountsRow| {
        let _ = write!(out, "{}", row.index);
        for value in row.values {
            match value {
                Some(v) => {
                    let _ = write!(out, ",{v}");
                }
                None => out.push_str(",x"),
            }
        }
        out.push('\n');
    };
    if dense {
        histograms.rows_dense().for_each(&mut push_row);
    } else {
        histograms.rows().for_each(&mut push_row);
    }

    out.push_str("Overflow");
    for field in Field::ALL {
        let _ = write!(out, ",{}", histograms.get(field).overflow());
    }
    out.push('\n');
    out
}

/// Render the human-readable summary block for `report`.
#[must_use]
pub fn render_summary(report: &FileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "----------------------------------------------");
    let _ = writeln!(
        out,
        "Date and time:            {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = write!(out, "Input file:               {}", report.input.display());
    if let Some(modified) = report.input_modified {
        let _ = write!(out, " ({})", modified.format("%Y-%m-%d-%H-%M-%S"));
    }
    out.push('\n');
    let _ = writeln!(out, "{}", report.summary);
    let _ = writeln!(
        out,
        "Output file:              {} ({})",
        report.artifacts.counts.display(),
        report.sizes.counts
    );
    let _ = writeln!(
        out,
        "Bad lines file:           {} ({})",
        report.artifacts.bad_lines.display(),
        report.sizes.bad_lines
    );
    let _ = writeln!(
        out,
        "Cleaned near miss file:   {} ({})",
        report.artifacts.near_miss.display(),
        report.sizes.near_miss
    );
    out
}
