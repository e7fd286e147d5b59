//! Output records and the scoring features extracted for each deal.

use ddsim_core::{Deal, Position, Suit};
use ddsim_dds::{Denomination, DoubleDummyResult};
use ddsim_pbn::format_deal;
use serde::Serialize;
use thiserror::Error;

/// Which contract a deal is scored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrainChoice {
    /// The declaring partnership's longest combined suit, higher suit on ties
    BestFit,
    Fixed(Denomination),
}

/// Declarer seat and strain used to score every deal of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub declarer: Position,
    pub strain: StrainChoice,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            declarer: Position::North,
            strain: StrainChoice::BestFit,
        }
    }
}

impl Scoring {
    /// The denomination to read from the trick table and the partnership
    /// fit length that goes with it.
    ///
    /// For notrump the fit is the partnership's longest combined suit.
    pub fn resolve(&self, deal: &Deal) -> (Denomination, usize) {
        let (longest_suit, longest) = longest_fit(deal, self.declarer);
        match self.strain {
            StrainChoice::BestFit => (Denomination::from_suit(longest_suit), longest),
            StrainChoice::Fixed(denomination) => match denomination.to_suit() {
                Some(suit) => (denomination, deal.partnership_length(self.declarer, suit)),
                None => (denomination, longest),
            },
        }
    }
}

fn longest_fit(deal: &Deal, declarer: Position) -> (Suit, usize) {
    let mut best = (Suit::Spades, deal.partnership_length(declarer, Suit::Spades));
    for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let length = deal.partnership_length(declarer, suit);
        if length > best.1 {
            best = (suit, length);
        }
    }
    best
}

/// A solved deal that cannot be turned into a row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("trick table has no entry for {declarer:?} in {denomination:?}")]
    MissingTricks {
        denomination: Denomination,
        declarer: Position,
    },

    #[error("trick count {0} is outside 0..=13")]
    TricksOutOfRange(u8),
}

/// One CSV record per solved deal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRow {
    pub pbn: String,
    pub fit_len: u8,
    pub hcp_north: f64,
    pub hcp_south: f64,
    pub tricks_made: u8,
}

impl EvaluationRow {
    /// Column names, in record order
    pub const HEADER: [&'static str; 5] = ["pbn", "fit_len", "hcp_north", "hcp_south", "tricks_made"];

    pub fn extract(
        deal: &Deal,
        table: &DoubleDummyResult,
        scoring: &Scoring,
    ) -> Result<Self, ExtractError> {
        let (denomination, fit_len) = scoring.resolve(deal);
        let tricks_made = table
            .get_tricks(denomination, scoring.declarer)
            .ok_or(ExtractError::MissingTricks {
                denomination,
                declarer: scoring.declarer,
            })?;
        if tricks_made > 13 {
            return Err(ExtractError::TricksOutOfRange(tricks_made));
        }

        Ok(Self {
            pbn: format_deal(deal),
            fit_len: fit_len as u8,
            hcp_north: f64::from(deal.hand(Position::North).hcp()),
            hcp_south: f64::from(deal.hand(Position::South).hcp()),
            tricks_made,
        })
    }
}
