//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Derives a unique-but-deterministic dealing seed for each deal of a game
//! from the base game seed, so a whole game replays from one number.

/// Derive a seed for dealing the cards of one deal.
///
/// `deal_no` counts every shuffle, including all-pass redeals, so a redeal
/// of the same round number still gets a fresh deck order.
pub fn derive_dealing_seed(game_seed: u64, deal_no: u32) -> u64 {
    // Simple arithmetic derivation for deterministic but unique seeds.
    game_seed
        .wrapping_add((deal_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(1)
}
