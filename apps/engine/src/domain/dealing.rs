//! Deterministic card dealing logic.

use crate::domain::rules::{DECK_SIZE, HAND_SIZE, PLAYERS, TALON_SIZE};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// A dealt round: three 10-card hands plus the 2-card talon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; PLAYERS],
    pub talon: Vec<Card>,
}

/// Generate the full 32-card deck in standard order.
fn full_deck() -> Vec<Card> {
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
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
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
        // Largest multiple of m that fits in u64; values >= limit are
        // discarded (rejection sampling) to avoid modulo bias.
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
    let mut rng = SplitMix64::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Deal a round deterministically given an RNG seed.
///
/// Deal order follows the table ritual: 3 cards to each hand, 2 to the
/// talon, then 4 and 3 to each hand. Hands are sorted for convenience.
pub fn deal_round(seed: u64) -> Result<Deal, DomainError> {
    let mut deck = full_deck();
    if deck.len() != DECK_SIZE {
        return Err(DomainError::validation(
            ValidationKind::CorruptDeck,
            format!("Deck must hold {DECK_SIZE} cards, found {}", deck.len()),
        ));
    }

    shuffle_with_seed(&mut deck, seed);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for hand in hands.iter_mut() {
        hand.reserve(HAND_SIZE + TALON_SIZE);
    }

    let mut idx = 0;
    for hand in hands.iter_mut() {
        hand.extend_from_slice(&deck[idx..idx + 3]);
        idx += 3;
    }
    // Talon is set aside after the first packet of three.
    let talon = deck[idx..idx + TALON_SIZE].to_vec();
    idx += TALON_SIZE;
    for hand in hands.iter_mut() {
        hand.extend_from_slice(&deck[idx..idx + 4]);
        idx += 4;
    }
    for hand in hands.iter_mut() {
        hand.extend_from_slice(&deck[idx..idx + 3]);
        idx += 3;
    }

    for hand in hands.iter_mut() {
        hand.sort();
    }

    Ok(Deal { hands, talon })
}
