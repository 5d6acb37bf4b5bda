use crate::error::{EngineError, Result};
use derive_builder::Builder;
use semver_stats_core::AnalysisConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RunConfig {
    #[builder(default)]
    pub inputs: Vec<PathBuf>,
    #[builder(default)]
    pub input_dir: Option<PathBuf>,
    /// Restricts directory discovery to these extensions when non-empty.
    #[builder(default)]
    pub extensions: Vec<String>,
    #[builder(default = "PathBuf::from(\".\")")]
    pub output_dir: PathBuf,

    #[builder(default)]
    pub analysis: AnalysisConfig,
    #[builder(default)]
    pub dense_rows: bool,
    #[builder(default = "true")]
    pub reprocess_near_misses: bool,

    #[builder(default = "1")]
    pub threads: usize,
    #[builder(default)]
    pub strict: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: vec![],
            input_dir: None,
            extensions: vec![],
            output_dir: PathBuf::from("."),
            analysis: AnalysisConfig::default(),
            dense_rows: false,
            reprocess_near_misses: true,
            threads: 1,
            strict: false,
        }
    }
}

impl RunConfig {
    /// Reject settings the engine cannot run with.
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] for zero histogram widths or an empty input set.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.numeric_width == 0 || self.analysis.tag_width == 0 {
            return Err(EngineError::Config(
                "histogram widths must be at least 1".to_string(),
            ));
        }
        if self.inputs.is_empty() && self.input_dir.is_none() {
            return Err(EngineError::Config(
                "no input files or input directory given".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = RunConfigBuilder::default()
            .inputs(vec![PathBuf::from("a.txt")])
            .build()
            .unwrap();
        assert_eq!(built.output_dir, PathBuf::from("."));
        assert!(built.reprocess_near_misses);
        assert_eq!(built.threads, 1);
        assert_eq!(built.analysis, AnalysisConfig::default());
        assert!(built.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let config = RunConfig {
            inputs: vec![PathBuf::from("a.txt")],
            analysis: AnalysisConfig {
                tag_width: 0,
                ..AnalysisConfig::default()
            },
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_validate_requires_inputs() {
        assert!(RunConfig::default().validate().is_err());
    }
}
