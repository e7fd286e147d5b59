//! Worker units: synthesize a batch of deals, solve them, extract rows.
//!
//! Failures are isolated as finely as the solver allows. A deal that fails
//! validation or extraction costs one row; a failed solver call costs its
//! whole sub-batch. Only the first failure of each batch is logged, the rest
//! are counted.

use crate::row::{EvaluationRow, Scoring};
use crate::scheduler::WorkUnit;
use ddsim_core::{Deal, DealGenerator};
use ddsim_dds::{panic_message, BatchSolver, SolverAdapter};
use log::{error, trace, warn};
use rand::Rng;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

/// Rows produced by one batch, plus how many requested deals were lost
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub rows: Vec<EvaluationRow>,
    pub failed: usize,
}

/// What a worker sends back for one work unit
#[derive(Debug)]
pub struct UnitReport {
    pub unit: WorkUnit,
    pub worker: usize,
    pub rows: Vec<EvaluationRow>,
    pub failed: usize,
    /// The unit panicked outside solver isolation; all its deals are lost
    pub crashed: bool,
}

/// Counts failures within one batch and logs only the first
struct FailureLog {
    worker: usize,
    failed: usize,
}

impl FailureLog {
    fn new(worker: usize) -> Self {
        Self { worker, failed: 0 }
    }

    fn record(&mut self, deals: usize, err: &dyn Display) {
        if self.failed == 0 {
            warn!(
                "worker {}: lost {} deal(s): {} (later failures in this batch are only counted)",
                self.worker, deals, err
            );
        }
        self.failed += deals;
    }
}

/// One worker's state: its own deal generator and shared read-only handles
/// to the solver adapter and scoring rules.
pub struct Worker<'a, S, R> {
    id: usize,
    generator: DealGenerator<R>,
    adapter: &'a SolverAdapter<S>,
    scoring: &'a Scoring,
}

impl<'a, S: BatchSolver, R: Rng> Worker<'a, S, R> {
    pub fn new(id: usize, rng: R, adapter: &'a SolverAdapter<S>, scoring: &'a Scoring) -> Self {
        Self {
            id,
            generator: DealGenerator::new(rng),
            adapter,
            scoring,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Generate and score `batch_size` deals.
    ///
    /// Rows keep generation order. `rows.len() + failed == batch_size`.
    pub fn run(&mut self, batch_size: usize) -> BatchOutcome {
        let mut failures = FailureLog::new(self.id);

        let mut deals: Vec<Deal> = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            let deal = self.generator.generate();
            match deal.validate() {
                Ok(()) => deals.push(deal),
                Err(e) => failures.record(1, &e),
            }
        }

        let mut rows = Vec::with_capacity(deals.len());
        for sub_batch in self.adapter.sub_batches(&deals) {
            match sub_batch.result {
                Ok(tables) => {
                    for (deal, table) in sub_batch.deals.iter().zip(&tables) {
                        match EvaluationRow::extract(deal, table, self.scoring) {
                            Ok(row) => rows.push(row),
                            Err(e) => failures.record(1, &e),
                        }
                    }
                }
                Err(e) => failures.record(sub_batch.deals.len(), &e),
            }
        }

        trace!(
            "worker {}: batch of {} gave {} rows",
            self.id,
            batch_size,
            rows.len()
        );
        BatchOutcome {
            rows,
            failed: failures.failed,
        }
    }

    /// Run one work unit, turning a panic into a crashed report instead of
    /// taking the pool down.
    pub fn run_unit(&mut self, unit: WorkUnit) -> UnitReport {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(unit.deals)));
        match outcome {
            Ok(batch) => UnitReport {
                unit,
                worker: self.id,
                rows: batch.rows,
                failed: batch.failed,
                crashed: false,
            },
            Err(payload) => {
                error!(
                    "worker {} crashed on unit {}: {}; {} deals lost",
                    self.id,
                    unit.index,
                    panic_message(payload.as_ref()),
                    unit.deals
                );
                UnitReport {
                    unit,
                    worker: self.id,
                    rows: Vec::new(),
                    failed: unit.deals,
                    crashed: true,
                }
            }
        }
    }
}
