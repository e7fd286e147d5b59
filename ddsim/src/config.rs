use crate::row::Scoring;
use ddsim_dds::{SolveScope, DEFAULT_MAX_BATCH};
use std::time::Duration;
use thiserror::Error;

/// Rejected configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("solver sub-batch ceiling must be at least 1")]
    ZeroSolverBatch,
}

/// Settings for one simulation run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Total deals to generate and solve
    pub total_deals: usize,
    /// Deals per work unit handed to a worker
    pub batch_size: usize,
    /// Most deals passed to the solver in a single call
    pub max_solver_batch: usize,
    /// Worker threads (0 = auto-detect)
    pub workers: usize,
    /// Base seed; worker `i` seeds from `seed + i`. `None` draws from the OS.
    pub seed: Option<u64>,
    pub scoring: Scoring,
    /// Solve the whole trick table rather than just the scored declarer
    pub full_table: bool,
    /// Emit the CSV header line
    pub write_header: bool,
    /// Minimum time between progress lines
    pub progress_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            total_deals: 1000,
            batch_size: 100,
            max_solver_batch: DEFAULT_MAX_BATCH,
            workers: 0,
            seed: None,
            scoring: Scoring::default(),
            full_table: false,
            write_header: true,
            progress_interval: Duration::from_secs(2),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.max_solver_batch == 0 {
            return Err(ConfigError::ZeroSolverBatch);
        }
        Ok(())
    }

    /// Get the actual number of workers to use.
    pub fn actual_workers(&self) -> usize {
        if self.workers == 0 {
            default_workers()
        } else {
            self.workers
        }
    }

    /// What the solver backend needs to fill in for rows to be extracted
    pub fn solve_scope(&self) -> SolveScope {
        if self.full_table {
            SolveScope::Full
        } else {
            SolveScope::Declarers(vec![self.scoring.declarer])
        }
    }
}

/// Available parallelism less two (one for the consuming thread, one for
/// the host), never below one
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(2)
        .max(1)
}
