use crate::{Card, Suit};

/// One seat's cards.
///
/// A hand produced by [`crate::DealGenerator`] holds 13 cards sorted spades
/// first and by descending rank within each suit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand {
            cards: Vec::with_capacity(13),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count cards of a specific suit
    pub fn suit_length(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|c| c.suit == suit).count()
    }

    /// Cards of one suit, in the order they are held
    pub fn cards_in_suit(&self, suit: Suit) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |c| c.suit == suit)
    }

    /// High card points (A=4, K=3, Q=2, J=1)
    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.hcp()).sum()
    }

    /// Sort by suit (spades first) and rank (high to low)
    pub fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| b.suit.cmp(&a.suit).then_with(|| b.rank.cmp(&a.rank)));
    }
}
