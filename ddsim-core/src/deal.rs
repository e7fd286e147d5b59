use crate::{Card, Hand, Suit};
use rand::Rng;
use thiserror::Error;

/// The four seats at a bridge table, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Position {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Position {
    /// All positions in dealing order
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    /// Parse N, E, S or W (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn partner(self) -> Position {
        Position::ALL[(self as usize + 2) % 4]
    }

    /// The seat to the left, which is also the opening leader when this
    /// seat declares
    pub fn next(self) -> Position {
        Position::ALL[(self as usize + 1) % 4]
    }

    pub fn is_north_south(self) -> bool {
        matches!(self, Position::North | Position::South)
    }
}

/// A structurally invalid deal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("{position:?} holds {count} cards, expected 13")]
    WrongHandSize { position: Position, count: usize },

    #[error("card {0} is dealt more than once")]
    DuplicateCard(Card),
}

/// A complete deal: 52 cards split 13 to each seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    hands: [Hand; 4],
}

impl Deal {
    /// Build a deal from hands in North, East, South, West order.
    ///
    /// No checks are made here; call [`Deal::validate`] on anything that did
    /// not come out of a [`DealGenerator`].
    pub fn from_hands(hands: [Hand; 4]) -> Self {
        Deal { hands }
    }

    pub fn hand(&self, position: Position) -> &Hand {
        &self.hands[position as usize]
    }

    /// Combined length of `suit` in the partnership that `position` belongs to
    pub fn partnership_length(&self, position: Position, suit: Suit) -> usize {
        self.hand(position).suit_length(suit) + self.hand(position.partner()).suit_length(suit)
    }

    /// Combined high card points of `position` and partner
    pub fn partnership_hcp(&self, position: Position) -> u8 {
        self.hand(position).hcp() + self.hand(position.partner()).hcp()
    }

    /// Check that every seat holds 13 cards and no card appears twice.
    ///
    /// 4 x 13 distinct cards drawn from a 52-card deck is the whole deck, so
    /// this also rules out omissions.
    pub fn validate(&self) -> Result<(), DealError> {
        let mut seen = 0u64;
        for position in Position::ALL {
            let hand = self.hand(position);
            if hand.len() != 13 {
                return Err(DealError::WrongHandSize {
                    position,
                    count: hand.len(),
                });
            }
            for &card in hand.cards() {
                let bit = 1u64 << card.to_index();
                if seen & bit != 0 {
                    return Err(DealError::DuplicateCard(card));
                }
                seen |= bit;
            }
        }
        Ok(())
    }
}

/// Uniformly random deal source.
///
/// The generator owns its random source. Parallel callers construct one
/// generator per worker so that no two workers share (or correlate) state.
pub struct DealGenerator<R> {
    rng: R,
}

impl<R: Rng> DealGenerator<R> {
    pub fn new(rng: R) -> Self {
        DealGenerator { rng }
    }

    /// Generate a random deal using a Fisher-Yates shuffle.
    ///
    /// The shuffled deck is cut into four contiguous groups of 13 for North,
    /// East, South and West, then each hand is sorted for presentation.
    pub fn generate(&mut self) -> Deal {
        let mut deck: [u8; 52] = std::array::from_fn(|i| i as u8);

        for i in (1..deck.len()).rev() {
            let j = self.rng.random_range(0..=i);
            deck.swap(i, j);
        }

        let hands = std::array::from_fn(|seat| {
            let mut hand = Hand::from_cards(
                deck[seat * 13..(seat + 1) * 13]
                    .iter()
                    .filter_map(|&idx| Card::from_index(idx))
                    .collect(),
            );
            hand.sort();
            hand
        });

        Deal { hands }
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<Deal> {
        (0..count).map(|_| self.generate()).collect()
    }
}
