//! Exchange engine: talon pickup and discard for the declarer.

use crate::domain::rules::{HAND_SIZE, TALON_SIZE};
use crate::domain::state::{require_declarer, seat_index, Phase, PlayerId, Round};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Move the two talon cards into the declarer's hand (10 → 12).
pub fn pickup_talon(round: &mut Round, who: PlayerId) -> Result<(), DomainError> {
    if round.phase != Phase::Exchanging {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "Talon can only be picked up during the exchange",
        ));
    }
    let declarer = require_declarer(round, "pickup_talon")?;
    if who != declarer {
        return Err(DomainError::validation(
            ValidationKind::NotPlayerTurn,
            "Only the declarer can pick up the talon",
        ));
    }
    if round.talon.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "Talon already picked up",
        ));
    }

    let talon = std::mem::take(&mut round.talon);
    let hand = &mut round.hands[seat_index(who)];
    hand.extend(talon);
    hand.sort();
    Ok(())
}

/// Return exactly two cards from the 12-card hand to the discard pile
/// (12 → 10), then unlock contract declaration.
///
/// Validation happens entirely before any mutation: a rejected discard
/// leaves the hand untouched.
pub fn discard(round: &mut Round, who: PlayerId, cards: &[Card]) -> Result<(), DomainError> {
    if round.phase != Phase::Exchanging {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "Discarding is only allowed during the exchange",
        ));
    }
    let declarer = require_declarer(round, "discard")?;
    if who != declarer {
        return Err(DomainError::validation(
            ValidationKind::NotPlayerTurn,
            "Only the declarer can discard",
        ));
    }
    if cards.len() != TALON_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            format!("Must discard exactly {TALON_SIZE} cards"),
        ));
    }
    if cards[0] == cards[1] {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            "Discards must be two distinct cards",
        ));
    }

    let hand = &round.hands[seat_index(who)];
    if hand.len() != HAND_SIZE + TALON_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            "Must pick up the talon before discarding",
        ));
    }
    for card in cards {
        if !hand.contains(card) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDiscard,
                format!("Card {card:?} not in hand"),
            ));
        }
    }

    let hand = &mut round.hands[seat_index(who)];
    hand.retain(|c| !cards.contains(c));
    // The discards go back face down as the talon; `discarded` is the
    // exchange record kept for history.
    round.talon = cards.to_vec();
    round.discarded = cards.to_vec();

    // Commit-time invariant: hand back to 10, two cards set aside.
    debug_assert_eq!(hand.len(), HAND_SIZE);
    round.phase = Phase::Declaring;
    Ok(())
}
