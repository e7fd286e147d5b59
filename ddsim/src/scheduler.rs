//! Work planning and the worker pool.
//!
//! # Architecture
//!
//! - **Queue**: hands out fixed-size work units, computed as they are claimed
//! - **Workers**: one long-lived task per pool thread, each owning its random
//!   source; they claim units from a shared queue until it runs dry
//! - **Consumer**: the calling thread, receiving unit reports in completion
//!   order over a bounded channel
//!
//! The channel holds at most one report per worker, so a slow consumer stalls
//! the workers instead of letting finished batches pile up in memory.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::worker::{UnitReport, Worker};
use ddsim_dds::{BatchSolver, SolverAdapter};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

/// A batch of deals for one worker invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkUnit {
    /// Position in the plan; used only for logging
    pub index: usize,
    pub deals: usize,
}

/// The planned units, handed out one at a time.
///
/// `total_deals` is split into `ceil(total_deals / batch_size)` units, the
/// last one holding the remainder. Units are computed when claimed, so the
/// queue stays the same size however many deals are requested. Each unit is
/// handed out exactly once.
pub struct WorkQueue {
    total_deals: usize,
    batch_size: usize,
    units: usize,
    next: AtomicUsize,
}

impl WorkQueue {
    /// A `batch_size` of zero is treated as one.
    pub fn new(total_deals: usize, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            total_deals,
            batch_size,
            units: total_deals.div_ceil(batch_size),
            next: AtomicUsize::new(0),
        }
    }

    /// Take the next unclaimed unit, if any remain.
    pub fn claim(&self) -> Option<WorkUnit> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.unit(index)
    }

    fn unit(&self, index: usize) -> Option<WorkUnit> {
        if index >= self.units {
            return None;
        }
        Some(WorkUnit {
            index,
            deals: self.batch_size.min(self.total_deals - index * self.batch_size),
        })
    }

    /// Every unit has been handed to a worker
    pub fn is_exhausted(&self) -> bool {
        self.next.load(Ordering::Relaxed) >= self.units
    }

    pub fn len(&self) -> usize {
        self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units == 0
    }
}

/// Pool lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    Idle,
    /// Units are still waiting to be claimed
    Dispatching,
    /// Every unit is claimed; waiting for the last reports
    Draining,
    Done,
}

impl PoolState {
    /// State after the consumer receives a report
    fn on_report(self, queue_exhausted: bool) -> PoolState {
        match self {
            PoolState::Dispatching if queue_exhausted => PoolState::Draining,
            state => state,
        }
    }
}

/// Runs a planned set of work units across a fixed worker pool.
pub struct Scheduler<'a, S> {
    config: &'a PipelineConfig,
    adapter: &'a SolverAdapter<S>,
    state: PoolState,
}

impl<'a, S: BatchSolver> Scheduler<'a, S> {
    pub fn new(config: &'a PipelineConfig, adapter: &'a SolverAdapter<S>) -> Self {
        Self {
            config,
            adapter,
            state: PoolState::Idle,
        }
    }

    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Dispatch every unit and hand each report to `on_report` as it
    /// completes.
    ///
    /// If `on_report` fails, the remaining workers stop after their current
    /// unit and the error is returned once they have exited.
    pub fn run<F>(&mut self, mut on_report: F) -> Result<(), PipelineError>
    where
        F: FnMut(UnitReport) -> Result<(), PipelineError>,
    {
        let queue = WorkQueue::new(self.config.total_deals, self.config.batch_size);
        if queue.is_empty() {
            debug!("nothing to dispatch");
            self.state = PoolState::Done;
            return Ok(());
        }

        let workers = self.config.actual_workers().min(queue.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ddsim-worker-{}", i))
            .build()?;
        info!(
            "dispatching {} units of up to {} deals to {} workers",
            queue.len(),
            self.config.batch_size,
            workers
        );

        let (tx, rx) = mpsc::sync_channel::<UnitReport>(workers);
        let adapter = self.adapter;
        let scoring = &self.config.scoring;
        let seed = self.config.seed;
        let queue = &queue;
        let state = &mut self.state;
        *state = PoolState::Dispatching;

        pool.in_place_scope(move |scope| {
            for id in 0..workers {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id as u64)),
                        None => StdRng::from_os_rng(),
                    };
                    let mut worker = Worker::new(id, rng, adapter, scoring);
                    while let Some(unit) = queue.claim() {
                        if tx.send(worker.run_unit(unit)).is_err() {
                            debug!("worker {}: consumer gone, stopping", id);
                            break;
                        }
                    }
                });
            }
            // Workers hold the only senders; the loop below ends once all exit
            drop(tx);

            for report in rx {
                let next = state.on_report(queue.is_exhausted());
                if next != *state {
                    debug!("all units claimed, draining");
                    *state = next;
                }
                on_report(report)?;
            }
            *state = PoolState::Done;
            Ok(())
        })
    }
}
