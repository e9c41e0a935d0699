#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Preferans rules engine: round state machine for the three-player
//! trick-taking game — auction, talon exchange, contract declaration,
//! whist, trick play, and scoring — plus a concurrent multi-game registry
//! and a pluggable move-selection policy seam.

pub mod ai;
pub mod domain;
pub mod errors;
pub mod services;

// Re-exports for public API
pub use ai::{Policy, PolicyError};
pub use domain::{
    apply_action, legal_actions, new_round, Action, Card, LegalActions, Phase, PlayerId, Rank,
    Round, RoundOutcome, Suit,
};
pub use errors::domain::{DomainError, NotFoundKind, ValidationKind};
pub use services::{GameService, GameSession};
