use crate::artifacts::is_artifact;
use crate::config::RunConfig;
use crate::error::Result;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Resolve the configured inputs: explicit files first, then the files found
/// directly inside `input_dir`.
///
/// Directory entries are sorted, de-duplicated against the explicit list, and
/// exclude this tool's own artifacts.
///
/// # Errors
/// Returns an error if the input directory cannot be walked.
pub fn collect_inputs(config: &RunConfig) -> Result<Vec<PathBuf>> {
    let mut inputs = config.inputs.clone();
    if let Some(dir) = &config.input_dir {
        let seen: BTreeSet<PathBuf> = inputs.iter().cloned().collect();
        inputs.extend(
            list_dir(dir, &config.extensions)?
                .into_iter()
                .filter(|p| !seen.contains(p)),
        );
    }
    Ok(inputs)
}

/// Regular files directly inside `dir`, sorted by path.
///
/// # Errors
/// Returns the first walk error (e.g. a missing directory).
pub fn list_dir(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .max_depth(Some(1))
        .hidden(true)
        .git_ignore(false)
        .ignore(false)
        .parents(false)
        .sort_by_file_path(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if is_artifact(&path) || !extension_allowed(&path, extensions) {
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

fn extension_allowed(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)))
}
