// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use semver_stats_engine::RunResult;
use semver_stats_engine::report::{FileReport, render_summary};
use std::io::Write;

/// Write the per-file summaries of `result` to `out` in `format`.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_results<W: Write>(out: &mut W, result: &RunResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, result),
        OutputFormat::Json => write_json(out, &result.reports),
        OutputFormat::Yaml => write_yaml(out, &result.reports),
    }
}

fn write_text<W: Write>(out: &mut W, result: &RunResult) -> Result<()> {
    writeln!(out, "semver_stats v{}", crate::VERSION)?;
    for report in &result.reports {
        writeln!(out)?;
        if report.pass > 0 {
            writeln!(out, "(near-miss reprocessing)")?;
        }
        write!(out, "{}", render_summary(report))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "[semver_stats] Completed: {} files processed, {} failed.",
        result.reports.len(),
        result.errors.len()
    )?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, reports: &[FileReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

fn write_yaml<W: Write>(out: &mut W, reports: &[FileReport]) -> Result<()> {
    out.write_all(serde_yaml::to_string(reports)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver_stats_engine::config::RunConfig;
    use std::fs;

    fn sample_result() -> (tempfile::TempDir, RunResult) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.txt");
        fs::write(&input, "1.0.0\nv1.0.1\n").unwrap();
        let config = RunConfig {
            inputs: vec![input],
            output_dir: dir.path().join("out"),
            ..RunConfig::default()
        };
        let result = semver_stats_engine::run(&config).unwrap();
        (dir, result)
    }

    #[test]
    fn test_text_output() {
        let (_dir, result) = sample_result();
        let mut buf = Vec::new();
        write_results(&mut buf, &result, OutputFormat::Text).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Near misses ('v' prefix): 1 (50.00%)"));
        assert!(text.contains("(near-miss reprocessing)"));
        assert!(text.contains("Completed: 2 files processed, 0 failed."));
    }

    #[test]
    fn test_json_output() {
        let (_dir, result) = sample_result();
        let mut buf = Vec::new();
        write_results(&mut buf, &result, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["summary"]["valid"], 1);
        assert_eq!(json[1]["pass"], 1);
    }
}
