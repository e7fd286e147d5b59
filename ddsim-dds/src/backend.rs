//! [`BatchSolver`] over the `bridge-solver` crate.

use crate::{BatchSolver, Denomination, DoubleDummyResult, SolverError};
use bridge_solver::{Hands, Seat, Solver};
use ddsim_core::{Deal, Position};
use ddsim_pbn::format_deal;
use log::trace;

const TOTAL_TRICKS: u8 = 13;

/// Which declarers a backend solves for. Each declarer costs five searches
/// (one per denomination).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveScope {
    /// All 20 cells of the table
    Full,
    /// Only these declarers, all denominations
    Declarers(Vec<Position>),
}

impl SolveScope {
    pub fn declarers(&self) -> &[Position] {
        match self {
            SolveScope::Full => &Position::ALL,
            SolveScope::Declarers(declarers) => declarers,
        }
    }
}

/// Solver backend driving the `bridge-solver` MTD(f) search.
///
/// Deals are solved one at a time within a batch; the batch interface exists
/// so callers can bound how much work a single call commits to.
#[derive(Debug, Clone)]
pub struct BridgeSolverBackend {
    scope: SolveScope,
}

impl BridgeSolverBackend {
    pub fn new(scope: SolveScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &SolveScope {
        &self.scope
    }

    fn solve_deal(&self, deal: &Deal) -> Result<DoubleDummyResult, SolverError> {
        let pbn = format_deal(deal);
        let hands = Hands::from_pbn(&pbn)
            .ok_or_else(|| SolverError::Rejected(format!("unreadable deal {}", pbn)))?;

        let mut result = DoubleDummyResult::new();
        for &declarer in self.scope.declarers() {
            // opening lead comes from declarer's left
            let leader = solver_seat(declarer.next());
            for denomination in Denomination::ALL {
                let ns_tricks = Solver::new(hands, solver_trump(denomination), leader).solve();
                let tricks = if declarer.is_north_south() {
                    Some(ns_tricks)
                } else {
                    TOTAL_TRICKS.checked_sub(ns_tricks)
                }
                .ok_or_else(|| {
                    SolverError::Backend(format!("{} north-south tricks for {}", ns_tricks, pbn))
                })?;

                trace!(
                    "{} {}{} = {}",
                    pbn,
                    declarer.to_char(),
                    denomination.to_char(),
                    tricks
                );
                result.set_tricks(denomination, declarer, tricks);
            }
        }
        Ok(result)
    }
}

impl Default for BridgeSolverBackend {
    fn default() -> Self {
        Self::new(SolveScope::Full)
    }
}

impl BatchSolver for BridgeSolverBackend {
    fn solve_batch(&self, deals: &[Deal]) -> Result<Vec<DoubleDummyResult>, SolverError> {
        deals.iter().map(|deal| self.solve_deal(deal)).collect()
    }
}

fn solver_trump(denomination: Denomination) -> usize {
    match denomination {
        Denomination::Clubs => bridge_solver::CLUB,
        Denomination::Diamonds => bridge_solver::DIAMOND,
        Denomination::Hearts => bridge_solver::HEART,
        Denomination::Spades => bridge_solver::SPADE,
        Denomination::NoTrump => bridge_solver::NOTRUMP,
    }
}

fn solver_seat(position: Position) -> Seat {
    match position {
        Position::North => bridge_solver::NORTH,
        Position::East => bridge_solver::EAST,
        Position::South => bridge_solver::SOUTH,
        Position::West => bridge_solver::WEST,
    }
}
