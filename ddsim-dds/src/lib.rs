//! Double-dummy evaluation for batches of deals.
//!
//! The solver itself is a black box behind [`BatchSolver`]: deals go in, one
//! [`DoubleDummyResult`] per deal comes out. [`SolverAdapter`] sits in front
//! of it and never hands the solver more than a configured number of deals in
//! one call, because the backend becomes unstable above an (undocumented)
//! batch size.

mod adapter;
mod backend;
mod result;
mod solver;

pub use adapter::{SolverAdapter, SubBatch, DEFAULT_MAX_BATCH};
pub use backend::{BridgeSolverBackend, SolveScope};
pub use result::{Denomination, DoubleDummyResult, TrickResult};
pub use solver::{panic_message, BatchSolver, SolverError};
