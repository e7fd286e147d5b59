use ddsim_core::{Position, Suit};

/// Denomination for double-dummy analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Denomination {
    /// All five denominations
    pub const ALL: [Denomination; 5] = [
        Denomination::Clubs,
        Denomination::Diamonds,
        Denomination::Hearts,
        Denomination::Spades,
        Denomination::NoTrump,
    ];

    pub fn from_suit(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => Denomination::Clubs,
            Suit::Diamonds => Denomination::Diamonds,
            Suit::Hearts => Denomination::Hearts,
            Suit::Spades => Denomination::Spades,
        }
    }

    /// Trump suit, or `None` for notrump
    pub fn to_suit(self) -> Option<Suit> {
        match self {
            Denomination::Clubs => Some(Suit::Clubs),
            Denomination::Diamonds => Some(Suit::Diamonds),
            Denomination::Hearts => Some(Suit::Hearts),
            Denomination::Spades => Some(Suit::Spades),
            Denomination::NoTrump => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Denomination::Clubs => 'C',
            Denomination::Diamonds => 'D',
            Denomination::Hearts => 'H',
            Denomination::Spades => 'S',
            Denomination::NoTrump => 'N',
        }
    }
}

/// Tricks for one denomination and declarer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickResult {
    pub denomination: Denomination,
    pub declarer: Position,
    pub tricks: u8,
}

/// Double-dummy trick table for one deal.
///
/// Holds the declaring side's tricks for each denomination and declarer.
/// A backend may fill only part of the table; unsolved cells read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoubleDummyResult {
    /// Index: [denomination][declarer]
    tricks: [[Option<u8>; 4]; 5],
}

impl DoubleDummyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tricks(&mut self, denomination: Denomination, declarer: Position, tricks: u8) {
        self.tricks[denomination as usize][declarer as usize] = Some(tricks);
    }

    pub fn get_tricks(&self, denomination: Denomination, declarer: Position) -> Option<u8> {
        self.tricks[denomination as usize][declarer as usize]
    }

    /// Every solved cell
    pub fn all_results(&self) -> Vec<TrickResult> {
        let mut results = Vec::new();
        for denomination in Denomination::ALL {
            for declarer in Position::ALL {
                if let Some(tricks) = self.get_tricks(denomination, declarer) {
                    results.push(TrickResult {
                        denomination,
                        declarer,
                        tricks,
                    });
                }
            }
        }
        results
    }
}
