//! Output artifact naming and crash-safe writing.

use crate::error::{EngineError, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The four files produced for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Counts,
    BadLines,
    NearMiss,
    Summary,
}

impl ArtifactKind {
    pub const ALL: [Self; 4] = [Self::Counts, Self::BadLines, Self::NearMiss, Self::Summary];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Counts => ".counts.csv",
            Self::BadLines => ".badlines.txt",
            Self::NearMiss => ".nearmiss.txt",
            Self::Summary => ".summary.txt",
        }
    }
}

/// `true` for file names this tool writes itself.
#[must_use]
pub fn is_artifact(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| ArtifactKind::ALL.iter().any(|k| name.ends_with(k.suffix())))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub counts: PathBuf,
    pub bad_lines: PathBuf,
    pub near_miss: PathBuf,
    pub summary: PathBuf,
}

impl ArtifactPaths {
    /// Paths for artifacts called `name` plus each kind's suffix.
    #[must_use]
    pub fn named(name: &str, output_dir: &Path) -> Self {
        let path = |kind: ArtifactKind| output_dir.join(format!("{name}{}", kind.suffix()));
        Self {
            counts: path(ArtifactKind::Counts),
            bad_lines: path(ArtifactKind::BadLines),
            near_miss: path(ArtifactKind::NearMiss),
            summary: path(ArtifactKind::Summary),
        }
    }
}

fn name_part<'a>(input: &'a Path, part: fn(&Path) -> Option<&OsStr>) -> Result<&'a str> {
    part(input)
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::NoStem(input.to_path_buf()))
}

/// Artifact names handed out during one run.
///
/// An input is named after its stem unless another input in the same batch
/// shares that stem or the stem is already taken, in which case the whole file
/// name is used. An input whose file name is taken as well gets
/// [`EngineError::ArtifactCollision`] and writes nothing.
#[derive(Debug, Default)]
pub struct ArtifactNames {
    claimed: HashSet<String>,
}

impl ArtifactNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign artifact paths to every input of a batch, in input order.
    pub fn assign(
        &mut self,
        inputs: &[PathBuf],
        output_dir: &Path,
    ) -> Vec<(PathBuf, Result<ArtifactPaths>)> {
        let mut stems: HashMap<&str, usize> = HashMap::new();
        for input in inputs {
            if let Ok(stem) = name_part(input, Path::file_stem) {
                *stems.entry(stem).or_default() += 1;
            }
        }

        inputs
            .iter()
            .map(|input| {
                let paths = self
                    .claim(input, &stems)
                    .map(|name| ArtifactPaths::named(&name, output_dir));
                (input.clone(), paths)
            })
            .collect()
    }

    fn claim(&mut self, input: &Path, stems: &HashMap<&str, usize>) -> Result<String> {
        let stem = name_part(input, Path::file_stem)?;
        let shared = stems.get(stem).is_some_and(|&n| n > 1);
        let name = if shared || self.claimed.contains(stem) {
            name_part(input, Path::file_name)?
        } else {
            stem
        };
        if !self.claimed.insert(name.to_owned()) {
            return Err(EngineError::ArtifactCollision {
                path: input.to_path_buf(),
                name: name.to_owned(),
            });
        }
        Ok(name.to_owned())
    }
}

/// A buffered file that only appears at its target path on [`AtomicFile::commit`].
///
/// Content goes to a temp file in the target directory, which is renamed over
/// the target once fully flushed. Dropping without committing removes the temp file.
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    tmp: PathBuf,
    writer: Option<BufWriter<File>>,
    committed: bool,
}

impl AtomicFile {
    /// # Errors
    /// Returns [`EngineError::FileWrite`] if the temp file cannot be created.
    pub fn create(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp = parent.join(format!(".{name}.{}.{nanos}.tmp", std::process::id()));

        let file = File::create(&tmp).map_err(|source| EngineError::FileWrite {
            path: tmp.clone(),
            source,
        })?;
        Ok(Self {
            target,
            tmp,
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// Write `line` followed by a newline.
    ///
    /// # Errors
    /// Returns [`EngineError::FileWrite`] on I/O failure.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.write_all(line.as_bytes())?;
        self.write_all(b"\n")
    }

    /// # Errors
    /// Returns [`EngineError::FileWrite`] on I/O failure.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let result = match self.writer.as_mut() {
            Some(w) => w.write_all(bytes),
            None => Err(std::io::Error::other("file already committed")),
        };
        result.map_err(|source| self.write_error(source))
    }

    /// Flush, sync and rename into place. Returns the final size in bytes.
    ///
    /// # Errors
    /// Returns [`EngineError::FileWrite`] if flushing or renaming fails; the
    /// target is left untouched in that case.
    pub fn commit(mut self) -> Result<u64> {
        let Some(writer) = self.writer.take() else {
            return Err(self.write_error(std::io::Error::other("file already committed")));
        };
        let file = writer
            .into_inner()
            .map_err(|e| self.write_error(e.into_error()))?;
        let _ = file.sync_all();
        let size = file
            .metadata()
            .map_err(|source| self.write_error(source))?
            .len();
        drop(file);

        fs::rename(&self.tmp, &self.target).map_err(|source| self.write_error(source))?;
        self.committed = true;
        Ok(size)
    }

    fn write_error(&self, source: std::io::Error) -> EngineError {
        EngineError::FileWrite {
            path: self.target.clone(),
            source,
        }
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        // Uncommitted: discard the partial content.
        drop(self.writer.take());
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_use_input_stem() {
        let inputs = [PathBuf::from("data/npm.csv")];
        let assigned = ArtifactNames::new().assign(&inputs, Path::new("out"));
        let paths = assigned[0].1.as_ref().unwrap();
        assert_eq!(paths.counts, Path::new("out/npm.counts.csv"));
        assert_eq!(paths.bad_lines, Path::new("out/npm.badlines.txt"));
        assert_eq!(paths.near_miss, Path::new("out/npm.nearmiss.txt"));
        assert_eq!(paths.summary, Path::new("out/npm.summary.txt"));
    }

    #[test]
    fn test_shared_stems_keep_extension() {
        let mut names = ArtifactNames::new();
        let inputs = [
            PathBuf::from("data/npm.csv"),
            PathBuf::from("data/npm.txt"),
            PathBuf::from("data/pypi.csv"),
        ];
        let assigned = names.assign(&inputs, Path::new("out"));
        let counts: Vec<_> = assigned
            .iter()
            .map(|(_, paths)| paths.as_ref().unwrap().counts.clone())
            .collect();
        assert_eq!(
            counts,
            [
                PathBuf::from("out/npm.csv.counts.csv"),
                PathBuf::from("out/npm.txt.counts.csv"),
                PathBuf::from("out/pypi.counts.csv"),
            ]
        );
    }

    #[test]
    fn test_same_file_name_in_two_dirs_collides() {
        let mut names = ArtifactNames::new();
        let inputs = [PathBuf::from("a/v.txt"), PathBuf::from("b/v.txt")];
        let assigned = names.assign(&inputs, Path::new("out"));
        assert_eq!(assigned[0].1.as_ref().unwrap().summary, Path::new("out/v.txt.summary.txt"));
        assert!(matches!(
            &assigned[1].1,
            Err(EngineError::ArtifactCollision { path, name })
                if path == Path::new("b/v.txt") && name == "v.txt"
        ));
    }

    #[test]
    fn test_names_stay_claimed_across_batches() {
        let mut names = ArtifactNames::new();
        let first = names.assign(&[PathBuf::from("npm.nearmiss.csv")], Path::new("out"));
        assert_eq!(first[0].1.as_ref().unwrap().counts, Path::new("out/npm.nearmiss.counts.csv"));
        let second = names.assign(&[PathBuf::from("out/npm.nearmiss.txt")], Path::new("out"));
        assert_eq!(
            second[0].1.as_ref().unwrap().counts,
            Path::new("out/npm.nearmiss.txt.counts.csv")
        );
    }

    #[test]
    fn test_is_artifact() {
        assert!(is_artifact(Path::new("x/npm.nearmiss.txt")));
        assert!(is_artifact(Path::new("npm.counts.csv")));
        assert!(!is_artifact(Path::new("npm.csv")));
    }

    #[test]
    fn test_commit_moves_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        let mut file = AtomicFile::create(&target).unwrap();
        file.write_line("1.0.0").unwrap();
        assert!(!target.exists());
        assert_eq!(file.commit().unwrap(), 6);
        assert_eq!(fs::read_to_string(&target).unwrap(), "1.0.0\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_drop_discards_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        {
            let mut file = AtomicFile::create(&target).unwrap();
            file.write_line("partial").unwrap();
        }
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
