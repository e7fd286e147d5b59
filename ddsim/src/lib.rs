//! Parallel double-dummy simulation of random bridge deals.
//!
//! Deals are generated in worker threads, solved through a [`BatchSolver`],
//! reduced to one [`EvaluationRow`] each and streamed as CSV to a writer.
//! Diagnostics go through `log`, never to the data writer.

pub mod config;
pub mod error;
pub mod output;
pub mod row;
pub mod scheduler;
pub mod summary;
pub mod worker;

pub use config::{default_workers, ConfigError, PipelineConfig};
pub use error::PipelineError;
pub use output::RowSink;
pub use row::{EvaluationRow, ExtractError, Scoring, StrainChoice};
pub use scheduler::{PoolState, Scheduler, WorkQueue, WorkUnit};
pub use summary::{Progress, RunCounters, RunSummary};
pub use worker::{BatchOutcome, UnitReport, Worker};

use ddsim_dds::{BatchSolver, SolverAdapter};
use log::debug;
use std::io::Write;

/// Run the whole pipeline, writing CSV rows to `out`.
///
/// Partial loss is not an error: the summary says how many deals failed.
/// A run that requested deals but emitted no rows ends in
/// [`PipelineError::TotalFailure`].
pub fn run<S, W>(config: &PipelineConfig, solver: S, out: W) -> Result<RunSummary, PipelineError>
where
    S: BatchSolver,
    W: Write,
{
    config.validate()?;

    let adapter = SolverAdapter::new(solver, config.max_solver_batch);
    let mut sink = RowSink::new(out, config.write_header)?;
    let mut counters = RunCounters::new(config.total_deals);
    let mut progress = Progress::new(config.progress_interval);

    let mut scheduler = Scheduler::new(config, &adapter);
    scheduler.run(|report| {
        debug!(
            "unit {} from worker {}: {} rows, {} failed",
            report.unit.index,
            report.worker,
            report.rows.len(),
            report.failed
        );
        sink.write_batch(&report.rows)?;
        counters.record(&report);
        progress.tick(&counters);
        Ok(())
    })?;
    sink.finish()?;

    progress.finish(&counters);
    let summary = counters.finish(progress.elapsed());
    summary.log();

    if summary.is_total_failure() {
        return Err(PipelineError::TotalFailure(summary));
    }
    Ok(summary)
}
