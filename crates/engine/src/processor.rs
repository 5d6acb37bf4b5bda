use crate::artifacts::{ArtifactPaths, AtomicFile};
use crate::config::RunConfig;
use crate::error::{EngineError, Result};
use crate::report::{ArtifactSizes, FileReport, render_counts, render_summary};
use chrono::{DateTime, Local, Utc};
use log::{debug, info};
use semver_stats_core::{Analysis, Classification};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Side-output files for one input, open for the duration of its run.
struct SideOutputs {
    bad_lines: AtomicFile,
    near_miss: AtomicFile,
}

/// Process a single input file and write its four artifacts to `artifacts`.
///
/// Bad-line and near-miss files are committed before the summary is rendered
/// so the sizes it reports are final. On error no artifact of this input is
/// left half-written.
///
/// # Errors
/// Returns an error if the input cannot be read or an artifact cannot be written.
pub fn process_file(
    input: &Path,
    artifacts: ArtifactPaths,
    pass: usize,
    config: &RunConfig,
) -> Result<FileReport> {
    let file = File::open(input).map_err(|source| EngineError::FileRead {
        path: input.to_path_buf(),
        source,
    })?;
    let input_modified = file
        .metadata()
        .and_then(|meta| meta.modified())
        .ok()
        .map(DateTime::<Utc>::from);
    let mut reader = BufReader::new(file);

    let mut outputs = SideOutputs {
        bad_lines: AtomicFile::create(&artifacts.bad_lines)?,
        near_miss: AtomicFile::create(&artifacts.near_miss)?,
    };
    let mut analysis = Analysis::new(config.analysis.clone());
    analyze_lines(&mut reader, &mut analysis, &mut outputs, input)?;

    let sizes = ArtifactSizes {
        bad_lines: outputs.bad_lines.commit()?,
        near_miss: outputs.near_miss.commit()?,
        counts: write_artifact(
            &artifacts.counts,
            &render_counts(analysis.histograms(), config.dense_rows),
        )?,
    };

    let (histograms, summary) = analysis.into_parts();
    let report = FileReport {
        input: input.to_path_buf(),
        input_modified,
        pass,
        generated_at: Local::now(),
        artifacts,
        sizes,
        summary,
        histograms,
    };
    write_artifact(&report.artifacts.summary, &render_summary(&report))?;

    info!(
        "{}: {} lines, {} valid, {} near misses, {} bad",
        input.display(),
        report.summary.lines,
        report.summary.valid,
        report.summary.near_miss,
        report.summary.bad
    );
    Ok(report)
}

/// Feed every line of `reader` through `analysis`, routing bad lines and
/// cleaned near misses to their side outputs.
fn analyze_lines<R: BufRead>(
    reader: &mut R,
    analysis: &mut Analysis,
    outputs: &mut SideOutputs,
    path: &Path,
) -> Result<()> {
    let mut line_buf = Vec::new();
    let mut first = true;
    loop {
        line_buf.clear();
        let read = reader
            .read_until(b'\n', &mut line_buf)
            .map_err(|source| EngineError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }

        // Lossy so that a stray non-UTF-8 byte makes a bad line, not a failed run.
        let text = String::from_utf8_lossy(&line_buf);
        let mut line = strip_line_ending(&text);
        if first {
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
            first = false;
        }

        match analysis.ingest(line) {
            Classification::Valid(_) => {}
            Classification::NearMiss { cleaned } => outputs.near_miss.write_line(cleaned)?,
            Classification::Bad => outputs.bad_lines.write_line(line)?,
        }
    }
    Ok(())
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn write_artifact(path: &Path, content: &str) -> Result<u64> {
    let mut file = AtomicFile::create(path)?;
    file.write_all(content.as_bytes())?;
    let size = file.commit()?;
    debug!("wrote {} ({size} bytes)", path.display());
    Ok(size)
}
