// crates/engine/src/lib.rs
use log::warn;
use rayon::prelude::*;
use std::path::PathBuf;

pub mod artifacts;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod processor;
pub mod report;

use crate::artifacts::{ArtifactNames, ArtifactPaths};
use crate::config::RunConfig;
use crate::error::{EngineError, Result};
use crate::report::FileReport;

/// Reports and per-file failures of one run.
#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
    pub errors: Vec<(PathBuf, EngineError)>,
}

/// Process every configured input, then the near-miss files they produced.
///
/// Files are independent and processed on a pool of `config.threads` workers;
/// reports come back in input order.
///
/// # Errors
///
/// Returns an error for an invalid configuration, an unreadable input
/// directory, an output directory that cannot be created, or, in strict mode,
/// the first per-file failure. Otherwise per-file failures are collected in
/// `RunResult::errors`.
pub fn run(config: &RunConfig) -> Result<RunResult> {
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir).map_err(|source| EngineError::FileWrite {
        path: config.output_dir.clone(),
        source,
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let mut result = RunResult::default();
    let mut names = ArtifactNames::new();
    let mut queue = filesystem::collect_inputs(config)?;
    let mut pass = 0;

    while !queue.is_empty() {
        let jobs = names.assign(&queue, &config.output_dir);
        let batch = pool.install(|| process_batch(jobs, pass, config))?;

        // Cleaned near misses are bare versions; one extra pass is enough.
        queue = if config.reprocess_near_misses && pass == 0 {
            batch
                .reports
                .iter()
                .filter(|r| r.sizes.near_miss > 0)
                .map(|r| r.artifacts.near_miss.clone())
                .collect()
        } else {
            Vec::new()
        };

        result.reports.extend(batch.reports);
        result.errors.extend(batch.errors);
        pass += 1;
    }

    Ok(result)
}

fn process_batch(
    jobs: Vec<(PathBuf, Result<ArtifactPaths>)>,
    pass: usize,
    config: &RunConfig,
) -> Result<RunResult> {
    let iter = jobs.into_par_iter().map(|(path, artifacts)| {
        artifacts
            .and_then(|artifacts| processor::process_file(&path, artifacts, pass, config))
            .map_err(|e| (path, e))
    });

    if config.strict {
        // Strict mode: fail on first error
        let reports = iter
            .map(|r| r.map_err(|(_, e)| e))
            .collect::<Result<Vec<_>>>()?;
        return Ok(RunResult {
            reports,
            errors: Vec::new(),
        });
    }

    let outcomes: Vec<_> = iter.collect();
    let mut batch = RunResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(report) => batch.reports.push(report),
            Err((path, e)) => {
                warn!("{}: {e}", path.display());
                batch.errors.push((path, e));
            }
        }
    }
    Ok(batch)
}
