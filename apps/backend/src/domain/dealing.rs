//! Deterministic card dealing logic.

use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Generate the full 40-card casino deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Rejection sampling avoids modulo bias.
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using deterministic RNG.
fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// A freshly shuffled stock for a new game.
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);
    deck
}

/// Deal `hand_size` cards to each player from the end of `stock`.
///
/// Cards leave the stock; nothing is created. Fails without touching the
/// stock when it cannot cover both hands.
pub fn deal_from_stock(
    stock: &mut Vec<Card>,
    hand_size: u8,
) -> Result<[Vec<Card>; PLAYERS], DomainError> {
    let needed = hand_size as usize * PLAYERS;
    if hand_size == 0 || stock.len() < needed {
        return Err(DomainError::validation(
            ValidationKind::Other("INSUFFICIENT_STOCK".into()),
            format!(
                "Cannot deal {hand_size} cards to {PLAYERS} players from {} remaining",
                stock.len()
            ),
        ));
    }
    let mut dealt = stock.split_off(stock.len() - needed);
    let mut hands: [Vec<Card>; PLAYERS] = std::array::from_fn(|_| Vec::new());
    // Alternate cards between players like a real deal.
    for (i, card) in dealt.drain(..).enumerate() {
        hands[i % PLAYERS].push(card);
    }
    for hand in hands.iter_mut() {
        hand.sort();
    }
    Ok(hands)
}
