//! Statistical checks on the Fisher-Yates deal generator.
//!
//! Seeded sources keep these deterministic; the bounds are loose enough
//! (about seven standard deviations) that any uniform shuffle passes.
use ddsim_core::{DealGenerator, Position, Suit};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DEALS: usize = 4000;

#[test]
fn test_every_card_reaches_every_seat_evenly() {
    let mut generator = DealGenerator::new(StdRng::seed_from_u64(2024));
    let mut seat_counts = [[0usize; 4]; 52];

    for _ in 0..DEALS {
        let deal = generator.generate();
        for position in Position::ALL {
            for card in deal.hand(position).cards() {
                seat_counts[card.to_index() as usize][position as usize] += 1;
            }
        }
    }

    let expected = DEALS / 4;
    for (card, counts) in seat_counts.iter().enumerate() {
        for (seat, &count) in counts.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < 200,
                "card {} landed in seat {} {} times (expected ~{})",
                card,
                seat,
                count,
                expected
            );
        }
    }
}

#[test]
fn test_average_partnership_fit_is_plausible() {
    // Mean combined length of a partnership in one suit is 6.5
    let mut generator = DealGenerator::new(StdRng::seed_from_u64(77));
    let total: usize = (0..DEALS)
        .map(|_| generator.generate().partnership_length(Position::North, Suit::Spades))
        .sum();
    let mean = total as f64 / DEALS as f64;
    assert!((6.3..6.7).contains(&mean), "mean spade fit {}", mean);
}

#[test]
fn test_independent_generators_do_not_repeat_each_other() {
    let mut first = DealGenerator::new(StdRng::seed_from_u64(1));
    let mut second = DealGenerator::new(StdRng::seed_from_u64(2));

    let shared = (0..100)
        .filter(|_| first.generate() == second.generate())
        .count();
    assert_eq!(shared, 0);
}
