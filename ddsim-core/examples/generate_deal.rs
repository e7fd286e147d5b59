use ddsim_core::{DealGenerator, Position, Suit};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut generator = DealGenerator::new(StdRng::seed_from_u64(1));
    let deal = generator.generate();

    println!("Bridge Deal (Seed: 1)");
    println!("=====================\n");

    for position in Position::ALL {
        let hand = deal.hand(position);
        println!("{}: {} cards, {} HCP", position.to_char(), hand.len(), hand.hcp());

        for suit in Suit::DISPLAY_ORDER {
            let ranks: String = hand.cards_in_suit(suit).map(|c| c.rank.to_char()).collect();
            println!("  {} {}", suit.to_char(), if ranks.is_empty() { "-" } else { &ranks });
        }
        println!();
    }

    println!(
        "North-South: {} HCP, {} spades",
        deal.partnership_hcp(Position::North),
        deal.partnership_length(Position::North, Suit::Spades)
    );
}
