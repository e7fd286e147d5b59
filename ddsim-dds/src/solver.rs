use crate::DoubleDummyResult;
use ddsim_core::Deal;
use std::any::Any;
use thiserror::Error;

/// Failure of one solver call. The whole sub-batch passed to that call is lost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("solver rejected deal: {0}")]
    Rejected(String),

    #[error("solver returned {got} tables for {expected} deals")]
    CountMismatch { expected: usize, got: usize },

    #[error("solver panicked: {0}")]
    Crashed(String),

    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// A double-dummy solver that evaluates several deals per call.
///
/// Implementations must return exactly one table per input deal, in input
/// order. They are shared between worker threads, so any internal caches
/// need their own synchronisation.
pub trait BatchSolver: Send + Sync {
    fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError>;
}

impl<S: BatchSolver + ?Sized> BatchSolver for &S {
    fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
        (**self).solve_batch(deals)
    }
}

impl<S: BatchSolver + ?Sized> BatchSolver for Box<S> {
    fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
        (**self).solve_batch(deals)
    }
}

/// Best-effort text of a caught panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
