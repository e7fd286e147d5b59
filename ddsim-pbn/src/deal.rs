use ddsim_core::{Card, Deal, DealError, Hand, Position, Rank, Suit};
use thiserror::Error;

/// Error returned when a PBN deal string cannot be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected <seat>:<hands>, got {0:?}")]
    MissingSeat(String),

    #[error("invalid seat {0:?}")]
    InvalidSeat(String),

    #[error("expected 4 hands, got {0}")]
    HandCount(usize),

    #[error("expected 4 suits separated by dots, got {0}")]
    SuitCount(usize),

    #[error("invalid rank character {0:?}")]
    InvalidRank(char),

    #[error(transparent)]
    InvalidDeal(#[from] DealError),
}

/// Format a deal as a PBN deal string starting with North.
///
/// Example: `N:KQ4.QJ982..AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8`
pub fn format_deal(deal: &Deal) -> String {
    let hands: Vec<String> = Position::ALL
        .iter()
        .map(|&position| format_hand(deal.hand(position)))
        .collect();
    format!("N:{}", hands.join(" "))
}

/// Format a hand as `Spades.Hearts.Diamonds.Clubs`, ranks descending
pub fn format_hand(hand: &Hand) -> String {
    let suits: Vec<String> = Suit::DISPLAY_ORDER
        .iter()
        .map(|&suit| {
            let mut ranks: Vec<Rank> = hand.cards_in_suit(suit).map(|c| c.rank).collect();
            ranks.sort_by(|a, b| b.cmp(a));
            ranks.into_iter().map(Rank::to_char).collect()
        })
        .collect();
    suits.join(".")
}

/// Parse a PBN deal string.
///
/// The first seat may be any of N, E, S or W; hands follow clockwise from
/// it. The result is validated as a complete 52-card deal.
pub fn parse_deal(input: &str) -> Result<Deal, ParseError> {
    let trimmed = input.trim();
    let (seat, hands_str) = trimmed
        .split_once(':')
        .ok_or_else(|| ParseError::MissingSeat(trimmed.to_string()))?;

    let mut seat_chars = seat.trim().chars();
    let first_seat = match (seat_chars.next(), seat_chars.next()) {
        (Some(c), None) => Position::from_char(c),
        _ => None,
    }
    .ok_or_else(|| ParseError::InvalidSeat(seat.to_string()))?;

    let hand_strs: Vec<&str> = hands_str.split_whitespace().collect();
    if hand_strs.len() != 4 {
        return Err(ParseError::HandCount(hand_strs.len()));
    }

    let mut hands: [Hand; 4] = Default::default();
    let mut position = first_seat;
    for hand_str in hand_strs {
        let mut hand = parse_hand(hand_str)?;
        hand.sort();
        hands[position as usize] = hand;
        position = position.next();
    }

    let deal = Deal::from_hands(hands);
    deal.validate()?;
    Ok(deal)
}

fn parse_hand(s: &str) -> Result<Hand, ParseError> {
    let suit_strs: Vec<&str> = s.split('.').collect();
    if suit_strs.len() != 4 {
        return Err(ParseError::SuitCount(suit_strs.len()));
    }

    let mut hand = Hand::new();
    for (&suit, suit_str) in Suit::DISPLAY_ORDER.iter().zip(suit_strs) {
        for c in suit_str.chars() {
            let rank = Rank::from_char(c).ok_or(ParseError::InvalidRank(c))?;
            hand.add_card(Card::new(suit, rank));
        }
    }
    Ok(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddsim_core::DealGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLE: &str = "N:KQ4.QJ982..AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8";

    #[test]
    fn test_parse_deal() {
        let deal = parse_deal(SAMPLE).unwrap();

        let north = deal.hand(Position::North);
        assert_eq!(north.len(), 13);
        assert_eq!(north.suit_length(Suit::Spades), 3);
        assert_eq!(north.suit_length(Suit::Hearts), 5);
        assert_eq!(north.suit_length(Suit::Diamonds), 0);
        assert_eq!(north.suit_length(Suit::Clubs), 5);
        assert_eq!(north.hcp(), 17);
    }

    #[test]
    fn test_format_matches_input() {
        let deal = parse_deal(SAMPLE).unwrap();
        assert_eq!(format_deal(&deal), SAMPLE);
    }

    #[test]
    fn test_parse_rotated_first_seat() {
        // Same deal listed from South
        let from_south = "S:9.K54.KQT732.652 AT872.T6.AJ64.T8 KQ4.QJ982..AKQ43 J653.A73.985.J97";
        assert_eq!(parse_deal(from_south).unwrap(), parse_deal(SAMPLE).unwrap());
    }

    #[test]
    fn test_generated_deal_format() {
        let deal = DealGenerator::new(StdRng::seed_from_u64(5)).generate();
        let pbn = format_deal(&deal);

        assert!(pbn.starts_with("N:"));
        assert_eq!(pbn.split_whitespace().count(), 4);
        assert_eq!(parse_deal(&pbn).unwrap(), deal);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_deal("KQ4.QJ982..AKQ43"),
            Err(ParseError::MissingSeat(_))
        ));
        assert!(matches!(
            parse_deal("X:KQ4.QJ982..AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8"),
            Err(ParseError::InvalidSeat(_))
        ));
        assert_eq!(
            parse_deal("N:KQ4.QJ982..AKQ43 J653.A73.985.J97"),
            Err(ParseError::HandCount(2))
        );
        assert_eq!(
            parse_deal("N:KQ4.QJ982.AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8"),
            Err(ParseError::SuitCount(3))
        );
        assert_eq!(
            parse_deal("N:KQ4.QJ982..AKQ4X J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8"),
            Err(ParseError::InvalidRank('X'))
        );
    }

    #[test]
    fn test_parse_rejects_duplicate_card() {
        // North's club three replaced by a second club king
        let dup = "N:KQ4.QJ982..AKQ4K J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8";
        assert!(matches!(parse_deal(dup), Err(ParseError::InvalidDeal(_))));
    }
}
