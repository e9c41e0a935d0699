//! Domain-level error type used across the engine and services.
//!
//! This error type is transport-agnostic. Callers embedding the engine
//! (an HTTP layer, a CLI, a test harness) should convert `DomainError`
//! into their own envelope at the boundary.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rule violations surfaced to the acting player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Bid does not outrank the current highest bid, reuses a special
    /// bid type, or is otherwise outside the legal bid set.
    IllegalBid,
    /// Action attempted by a player other than the expected actor.
    NotPlayerTurn,
    /// Card not in hand or not in the legal-card set for this trick.
    IllegalCard,
    /// Discard is not exactly two distinct cards from a 12-card hand.
    InvalidDiscard,
    /// Contract level/trump combination is not allowed.
    InvalidContract,
    /// Action does not apply in the current round phase.
    InvalidGameState,
    /// Card token failed to parse.
    ParseCard,
    /// Deck failed its size/uniqueness check before dealing.
    CorruptDeck,
    Other(String),
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other("VALIDATION_ERROR".into()), detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
}
