//! Error types for the simulation pipeline

use crate::config::ConfigError;
use crate::summary::RunSummary;
use thiserror::Error;

/// Run-level failure. Per-deal and per-sub-batch failures never surface
/// here; they are counted in the [`RunSummary`].
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Rejected settings
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool could not be started
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Writing to the output channel failed
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// CSV encoding of a row failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Every requested deal was lost
    #[error("no rows produced: {0}")]
    TotalFailure(RunSummary),
}

impl PipelineError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::TotalFailure(_) => 1,
            _ => 2,
        }
    }
}
