//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod contract;
pub mod dealing;
pub mod exchange;
pub mod fixtures;
pub mod rounds;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_contract;
#[cfg(test)]
mod tests_exchange;
#[cfg(test)]
mod tests_props_tricks;

// Re-exports for ergonomics
pub use actions::{apply_action, legal_actions, Action, LegalActions};
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::deal_round;
pub use rounds::new_round;
pub use seed_derivation::derive_dealing_seed;
pub use state::{Phase, PlayerId, Round, RoundOutcome};
