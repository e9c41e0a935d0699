//! Policy trait definition.

use std::fmt;

use crate::domain::actions::{Action, LegalActions};
use crate::domain::Round;

/// Errors that can occur during policy decision-making.
#[derive(Debug)]
pub enum PolicyError {
    /// The option list was empty; there is nothing to choose.
    NoLegalActions,
    /// Policy encountered an internal error
    Internal(String),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::NoLegalActions => write!(f, "no legal actions to choose from"),
            PolicyError::Internal(msg) => write!(f, "policy internal error: {msg}"),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Trait for move-selection policies.
///
/// Implementations receive the round state and the complete legal option
/// set for the current actor, and must return one of those options. The
/// engine validates the returned action again on apply, so a misbehaving
/// policy cannot corrupt the round.
pub trait Policy: Send {
    fn choose_action(&mut self, round: &Round, legal: &LegalActions) -> Result<Action, PolicyError>;
}
