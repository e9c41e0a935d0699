//! Contract declaration and the whist decisions that follow it.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::BidType;
use crate::domain::rules::{BETL_LEVEL, SANS_LEVEL};
use crate::domain::state::{
    next_player, prev_player, require_declarer, require_min_level, Phase, PlayerId, Round,
    RoundOutcome, SEATS,
};
use crate::domain::Suit;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    /// Trump contract at level 2..=5; declarer needs 6 tricks.
    Suit,
    /// Level 6: declarer must take no trick at all.
    Betl,
    /// Level 7: no trump in play; declarer needs 6 tricks.
    Sans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_type: ContractType,
    /// Present iff the contract type is Suit.
    pub trump: Option<Suit>,
    /// Declared level 2..=7.
    pub level: u8,
    /// True when the winning bid was in_hand (no exchange happened).
    pub is_in_hand: bool,
}

impl Contract {
    pub fn tricks_required(&self) -> u8 {
        match self.contract_type {
            ContractType::Betl => 0,
            ContractType::Suit | ContractType::Sans => 6,
        }
    }
}

/// Whist decisions of the two defenders, in decision order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhistRecord {
    /// (seat, held) in the order the defenders decided.
    pub decisions: Vec<(PlayerId, bool)>,
}

impl WhistRecord {
    pub fn has_decided(&self, seat: PlayerId) -> bool {
        self.decisions.iter().any(|(s, _)| *s == seat)
    }

    pub fn is_follower(&self, seat: PlayerId) -> bool {
        self.decisions.iter().any(|(s, held)| *s == seat && *held)
    }

    pub fn followers(&self) -> Vec<PlayerId> {
        self.decisions
            .iter()
            .filter(|(_, held)| *held)
            .map(|(s, _)| *s)
            .collect()
    }
}

/// Declare the contract. Level 2..=5 requires a trump suit; Betl (6) and
/// Sans (7) forbid one.
pub fn declare_contract(
    round: &mut Round,
    who: PlayerId,
    level: u8,
    trump: Option<Suit>,
) -> Result<(), DomainError> {
    if round.phase != Phase::Declaring {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "Contract declaration is not open",
        ));
    }
    let declarer = require_declarer(round, "declare_contract")?;
    if who != declarer {
        return Err(DomainError::validation(
            ValidationKind::NotPlayerTurn,
            "Only the declarer can announce the contract",
        ));
    }

    let min_level = require_min_level(round, "declare_contract")?;
    if level < min_level || level > SANS_LEVEL {
        return Err(DomainError::validation(
            ValidationKind::InvalidContract,
            format!("Contract level must be between {min_level} and {SANS_LEVEL}"),
        ));
    }

    let contract_type = match level {
        BETL_LEVEL => ContractType::Betl,
        SANS_LEVEL => ContractType::Sans,
        _ => ContractType::Suit,
    };
    match contract_type {
        ContractType::Suit => {
            if trump.is_none() {
                return Err(DomainError::validation(
                    ValidationKind::InvalidContract,
                    "Suit contract requires a trump suit",
                ));
            }
        }
        ContractType::Betl | ContractType::Sans => {
            if trump.is_some() {
                return Err(DomainError::validation(
                    ValidationKind::InvalidContract,
                    format!("{contract_type:?} contract cannot have a trump suit"),
                ));
            }
        }
    }

    let is_in_hand = round
        .auction
        .highest_bid()
        .map(|b| b.bid_type == BidType::InHand)
        .unwrap_or(false);

    round.contract = Some(Contract {
        contract_type,
        trump,
        level,
        is_in_hand,
    });

    // Defenders declare in clockwise order from the declarer.
    round.phase = Phase::Whisting;
    round.turn = Some(next_player(declarer));
    Ok(())
}

/// Record one defender's whist decision: hold (oppose the declarer) or
/// pass (sit the round out, scoring 0).
pub fn whist_decision(round: &mut Round, who: PlayerId, hold: bool) -> Result<(), DomainError> {
    if round.phase != Phase::Whisting {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "No whist decision is pending",
        ));
    }
    if round.turn != Some(who) {
        return Err(DomainError::validation(
            ValidationKind::NotPlayerTurn,
            format!("Not seat {who}'s turn to declare whist"),
        ));
    }

    let declarer = require_declarer(round, "whist_decision")?;
    round.whist.decisions.push((who, hold));

    let next = next_player(who);
    if next != declarer && !round.whist.has_decided(next) {
        round.turn = Some(next);
        return Ok(());
    }

    // Both defenders have decided.
    if round.whist.followers().is_empty() {
        // Nobody opposes: the declarer wins unopposed, no trick is played.
        round.outcome = Some(RoundOutcome::NoFollowers);
        round.phase = Phase::Scoring;
        round.turn = None;
        return Ok(());
    }

    let leader = first_leader(round)?;
    round.phase = Phase::Trick { trick_no: 1 };
    round.leader = Some(leader);
    round.turn = Some(leader);
    Ok(())
}

/// Who leads the first trick.
///
/// Sans: the seat before the declarer. Otherwise: the first seat in fixed
/// order that is playing for a score (the declarer or a follower).
fn first_leader(round: &Round) -> Result<PlayerId, DomainError> {
    let declarer = require_declarer(round, "first_leader")?;
    let contract = round.contract.as_ref().ok_or_else(|| {
        DomainError::validation_other("Invariant violated: contract must be set (first_leader)")
    })?;

    if contract.contract_type == ContractType::Sans {
        return Ok(prev_player(declarer));
    }

    for seat in SEATS {
        if seat == declarer || round.whist.is_follower(seat) {
            return Ok(seat);
        }
    }
    Ok(declarer)
}
