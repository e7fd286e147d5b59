use crate::{panic_message, BatchSolver, DoubleDummyResult, SolverError};
use ddsim_core::Deal;
use log::debug;
use std::panic::{self, AssertUnwindSafe};

/// Largest batch the reference backend was observed to handle reliably.
///
/// Found by experiment on one backend and platform, not derived from any
/// documented limit; callers should expose it as a setting.
pub const DEFAULT_MAX_BATCH: usize = 40;

/// One solver call's worth of deals and what the solver made of them
#[derive(Debug)]
pub struct SubBatch<'a> {
    pub deals: &'a [Deal],
    pub result: Result<Vec<DoubleDummyResult>, SolverError>,
}

/// Splits deal lists into solver-sized sub-batches.
///
/// Every call into the wrapped solver receives at most `max_batch` deals.
/// Failures are not retried: a failed call loses exactly the deals in its
/// sub-batch. Panics raised inside the solver are caught and reported as
/// [`SolverError::Crashed`].
pub struct SolverAdapter<S> {
    solver: S,
    max_batch: usize,
}

impl<S: BatchSolver> SolverAdapter<S> {
    /// Wrap `solver`. A `max_batch` of zero is treated as one.
    pub fn new(solver: S, max_batch: usize) -> Self {
        Self {
            solver,
            max_batch: max_batch.max(1),
        }
    }

    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Evaluate `deals`, returning one table per deal in input order.
    ///
    /// Fails with the first sub-batch error; use [`Self::sub_batches`] to keep
    /// the results of the sub-batches that did succeed.
    pub fn evaluate_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
        let mut tables = Vec::with_capacity(deals.len());
        for sub_batch in self.sub_batches(deals) {
            tables.extend(sub_batch.result?);
        }
        Ok(tables)
    }

    /// Lazily evaluate consecutive sub-batches of at most `max_batch` deals.
    ///
    /// The solver is called when the iterator is advanced, one sub-batch at a
    /// time.
    pub fn sub_batches<'a>(&'a self, deals: &'a [Deal]) -> impl Iterator<Item = SubBatch<'a>> + 'a {
        deals.chunks(self.max_batch).map(move |chunk| SubBatch {
            deals: chunk,
            result: self.call_solver(chunk),
        })
    }

    fn call_solver(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
        debug!("solving sub-batch of {} deals", deals.len());

        let tables = panic::catch_unwind(AssertUnwindSafe(|| self.solver.solve_batch(deals)))
            .map_err(|payload| SolverError::Crashed(panic_message(payload.as_ref())))??;

        if tables.len() != deals.len() {
            return Err(SolverError::CountMismatch {
                expected: deals.len(),
                got: tables.len(),
            });
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Denomination;
    use ddsim_core::{DealGenerator, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scores every cell from North-South high card points
    fn score(deal: &Deal) -> DoubleDummyResult {
        let ns = deal.partnership_hcp(Position::North) / 3;
        let mut table = DoubleDummyResult::new();
        for denomination in Denomination::ALL {
            for declarer in Position::ALL {
                let tricks = if declarer.is_north_south() { ns } else { 13 - ns };
                table.set_tricks(denomination, declarer, tricks);
            }
        }
        table
    }

    #[derive(Default)]
    struct RecordingSolver {
        calls: Mutex<Vec<usize>>,
    }

    impl BatchSolver for RecordingSolver {
        fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
            self.calls.lock().unwrap().push(deals.len());
            Ok(deals.iter().map(score).collect())
        }
    }

    /// Fails its `fail_on`th call (zero-based)
    struct FailingSolver {
        calls: AtomicUsize,
        fail_on: usize,
    }

    impl BatchSolver for FailingSolver {
        fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == self.fail_on {
                return Err(SolverError::Backend("injected".to_string()));
            }
            Ok(deals.iter().map(score).collect())
        }
    }

    struct PanickingSolver;

    impl BatchSolver for PanickingSolver {
        fn solve_batch(&self, _deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
            panic!("solver exploded");
        }
    }

    struct ShortSolver;

    impl BatchSolver for ShortSolver {
        fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
            Ok(deals.iter().skip(1).map(score).collect())
        }
    }

    fn deals(count: usize) -> Vec<Deal> {
        DealGenerator::new(StdRng::seed_from_u64(11)).generate_many(count)
    }

    #[test]
    fn test_splits_at_ceiling() {
        let adapter = SolverAdapter::new(RecordingSolver::default(), 40);
        let tables = adapter.evaluate_batch(&deals(95)).unwrap();

        assert_eq!(tables.len(), 95);
        assert_eq!(*adapter.solver().calls.lock().unwrap(), vec![40, 40, 15]);
    }

    #[test]
    fn test_small_input_is_one_call() {
        let adapter = SolverAdapter::new(RecordingSolver::default(), DEFAULT_MAX_BATCH);
        adapter.evaluate_batch(&deals(3)).unwrap();
        assert_eq!(*adapter.solver().calls.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_empty_input_never_calls_solver() {
        let adapter = SolverAdapter::new(RecordingSolver::default(), 40);
        assert_eq!(adapter.evaluate_batch(&[]), Ok(Vec::new()));
        assert!(adapter.solver().calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_ceiling_is_clamped() {
        let adapter = SolverAdapter::new(RecordingSolver::default(), 0);
        assert_eq!(adapter.max_batch(), 1);
        adapter.evaluate_batch(&deals(2)).unwrap();
        assert_eq!(*adapter.solver().calls.lock().unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_result_independent_of_ceiling() {
        let input = deals(57);
        let expected: Vec<DoubleDummyResult> = input.iter().map(score).collect();

        for ceiling in [1, 7, 40, 57, 100] {
            let adapter = SolverAdapter::new(RecordingSolver::default(), ceiling);
            assert_eq!(adapter.evaluate_batch(&input).unwrap(), expected, "ceiling {}", ceiling);
        }
    }

    #[test]
    fn test_failed_sub_batch_loses_only_its_deals() {
        let adapter = SolverAdapter::new(
            FailingSolver {
                calls: AtomicUsize::new(0),
                fail_on: 1,
            },
            10,
        );
        let input = deals(25);
        let outcomes: Vec<(usize, bool)> = adapter
            .sub_batches(&input)
            .map(|sub| (sub.deals.len(), sub.result.is_ok()))
            .collect();

        assert_eq!(outcomes, vec![(10, true), (10, false), (5, true)]);
    }

    #[test]
    fn test_evaluate_batch_reports_failure() {
        let adapter = SolverAdapter::new(
            FailingSolver {
                calls: AtomicUsize::new(0),
                fail_on: 0,
            },
            10,
        );
        assert_eq!(
            adapter.evaluate_batch(&deals(5)),
            Err(SolverError::Backend("injected".to_string()))
        );
    }

    #[test]
    fn test_panic_becomes_crash_error() {
        let adapter = SolverAdapter::new(PanickingSolver, 10);
        assert_eq!(
            adapter.evaluate_batch(&deals(2)),
            Err(SolverError::Crashed("solver exploded".to_string()))
        );
    }

    #[test]
    fn test_count_mismatch() {
        let adapter = SolverAdapter::new(ShortSolver, 10);
        assert_eq!(
            adapter.evaluate_batch(&deals(4)),
            Err(SolverError::CountMismatch {
                expected: 4,
                got: 3
            })
        );
    }
}
