#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod classify;
pub mod config;
pub mod grammar;
pub mod histogram;
pub mod summary;

pub use classify::{Analysis, Classification, classify};
pub use config::{AnalysisConfig, CountPolicy, OverflowWeighting};
pub use grammar::{LineMatch, VersionRecord, match_line};
pub use histogram::{CountsRow, Field, FieldHistograms, Histogram, Slot};
pub use summary::{Category, RunSummary};
