use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Input file name has no usable stem: {0}")]
    NoStem(std::path::PathBuf),

    #[error("Output name '{name}' for '{path}' is already used by another input")]
    ArtifactCollision {
        path: std::path::PathBuf,
        name: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
