//! Trick-play engine: legal cards, trick resolution, lead rotation.

use crate::domain::contract::ContractType;
use crate::domain::rules::TRICKS_PER_ROUND;
use crate::domain::state::{
    expected_actor, is_seat, next_player, require_contract, require_turn, seat_index, Phase,
    PlayerId, Round, RoundOutcome, Trick,
};
use crate::domain::{card_beats, hand_has_suit, Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether a trick was completed (3 cards played).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<PlayerId>,
    /// Whether this play ended the round (10 tricks, or Betl failure).
    pub round_completed: bool,
}

/// Trump suit in play, if any. Betl and Sans have none.
fn trump_suit(round: &Round) -> Option<Suit> {
    round
        .contract
        .as_ref()
        .filter(|c| c.contract_type == ContractType::Suit)
        .and_then(|c| c.trump)
}

/// Compute legal cards the player may play, independent of turn enforcement.
pub fn legal_moves(round: &Round, who: PlayerId) -> Vec<Card> {
    // If not in Trick phase, the set is empty.
    let Phase::Trick { .. } = round.phase else {
        return Vec::new();
    };
    if !is_seat(who) {
        return Vec::new();
    }

    let hand = &round.hands[seat_index(who)];
    if hand.is_empty() {
        return Vec::new();
    }

    if let Some(lead) = round.trick_lead {
        if hand_has_suit(hand, lead) {
            let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
            v.sort();
            return v;
        }
        // Holding none of the led suit forces a trump in suit contracts.
        if let Some(trump) = trump_suit(round) {
            if hand_has_suit(hand, trump) {
                let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == trump).collect();
                v.sort();
                return v;
            }
        }
    }

    let mut any = hand.clone();
    any.sort();
    any
}

/// Play a card into the current trick, enforcing turn, suit-following, and phase.
pub fn play_card(
    round: &mut Round,
    who: PlayerId,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    let Phase::Trick { trick_no } = round.phase else {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "No trick is in progress",
        ));
    };

    let turn = require_turn(round, "play_card")?;
    if turn != who {
        return Err(DomainError::validation(
            ValidationKind::NotPlayerTurn,
            format!("Not seat {who}'s turn to play"),
        ));
    }
    if let Some(leader) = round.leader {
        // Turn order within a trick is pure rotation from the leader.
        debug_assert_eq!(who, expected_actor(leader, round.trick_plays.len() as u8));
    }

    // Card in hand (immutable check first to avoid borrow conflicts)
    let pos_opt = round.hands[seat_index(who)].iter().position(|&c| c == card);
    let Some(pos) = pos_opt else {
        return Err(DomainError::validation(
            ValidationKind::IllegalCard,
            "Card not in hand",
        ));
    };

    // Suit following check using an immutable borrow only
    let legal = legal_moves(round, who);
    if !legal.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::IllegalCard,
            "Must follow suit (or trump when out of it)",
        ));
    }

    // On first play, set the lead
    if round.trick_plays.is_empty() {
        round.trick_lead = Some(card.suit);
        round.leader = Some(who);
    }

    let removed = round.hands[seat_index(who)].remove(pos);
    round.trick_plays.push((who, removed));
    round.turn = Some(next_player(who));

    let trick_completed = round.trick_plays.len() == crate::domain::rules::PLAYERS;
    let mut result = PlayCardResult {
        trick_completed,
        trick_winner: None,
        round_completed: false,
    };

    if !trick_completed {
        return Ok(result);
    }

    // Resolve completed trick
    let winner = resolve_current_trick(round).ok_or_else(|| {
        DomainError::validation_other("Invariant violated: completed trick must resolve")
    })?;
    round.tricks_won[seat_index(winner)] += 1;
    result.trick_winner = Some(winner);

    let leader = round.leader.unwrap_or(who);
    round.tricks.push(Trick {
        number: trick_no,
        leader,
        plays: std::mem::take(&mut round.trick_plays),
        winner,
    });
    round.trick_lead = None;
    round.leader = Some(winner);
    round.turn = Some(winner);

    // Betl fails the moment the declarer takes a trick; there is nothing
    // left to decide, so the round ends early.
    let contract = require_contract(round, "play_card trick_complete")?;
    let betl_failed =
        contract.contract_type == ContractType::Betl && round.declarer == Some(winner);

    if betl_failed || trick_no >= TRICKS_PER_ROUND {
        round.phase = Phase::Scoring;
        round.outcome = Some(RoundOutcome::Played);
        round.turn = None;
        round.leader = None;
        result.round_completed = true;
        return Ok(result);
    }

    round.phase = Phase::Trick {
        trick_no: trick_no + 1,
    };
    Ok(result)
}

/// Resolve the current trick winner if complete.
pub fn resolve_current_trick(round: &Round) -> Option<PlayerId> {
    if round.trick_plays.len() < crate::domain::rules::PLAYERS {
        return None;
    }
    let lead = round.trick_lead?;
    let trump = trump_suit(round);

    let mut best_idx = 0usize;
    for i in 1..round.trick_plays.len() {
        let (_, card_i) = round.trick_plays[i];
        let (_, card_best) = round.trick_plays[best_idx];
        if card_beats(card_i, card_best, lead, trump) {
            best_idx = i;
        }
    }
    Some(round.trick_plays[best_idx].0)
}
