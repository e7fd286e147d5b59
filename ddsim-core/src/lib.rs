mod card;
mod deal;
mod hand;

pub use card::{Card, Rank, Suit};
pub use deal::{Deal, DealError, DealGenerator, Position};
pub use hand::Hand;
