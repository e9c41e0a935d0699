//! Scoring engine: pure per-round score computation and its application.
//!
//! The numeric payout table is configuration, not algorithm: callers may
//! inject their own `ScoreTable` and the engine only consumes it here.

use serde::{Deserialize, Serialize};

use crate::domain::contract::{Contract, ContractType};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{
    require_contract, require_declarer, seat_index, Phase, PlayerId, Round, RoundOutcome, SEATS,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Injectable payout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Per-suit multiplier for suit contracts, indexed C, D, H, S.
    pub suit_values: [i16; 4],
    /// Betl contract value per level.
    pub betl_unit: i16,
    /// Sans contract value per level.
    pub sans_unit: i16,
    /// Failure multiplier for in-hand contracts.
    pub in_hand_fail_factor: i16,
    /// Points per trick a follower takes.
    pub follower_trick_unit: i16,
    /// Tricks a follower is expected to take against the declarer.
    pub follower_quota: u8,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            suit_values: [1, 2, 3, 4],
            betl_unit: 5,
            sans_unit: 10,
            in_hand_fail_factor: 2,
            follower_trick_unit: 1,
            follower_quota: 2,
        }
    }
}

impl ScoreTable {
    /// Base value of a contract, before any failure multiplier.
    pub fn contract_value(&self, contract: &Contract) -> i16 {
        let level = contract.level as i16;
        match contract.contract_type {
            ContractType::Betl => level * self.betl_unit,
            ContractType::Sans => level * self.sans_unit,
            ContractType::Suit => {
                let suit_value = contract
                    .trump
                    .map(|s| self.suit_values[s as usize])
                    .unwrap_or(1);
                level * suit_value
            }
        }
    }
}

/// Per-player score deltas for one completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub outcome: RoundOutcome,
    pub declarer: Option<PlayerId>,
    /// Whether the declarer made the contract (None for all-pass rounds).
    pub declarer_made: Option<bool>,
    /// Score deltas indexed by seat.
    pub deltas: [i16; PLAYERS],
    /// Tricks won indexed by seat.
    pub tricks_won: [u8; PLAYERS],
}

/// Pure function of the finished round: per-player score deltas.
pub fn score_round(round: &Round, table: &ScoreTable) -> Result<ScoreBreakdown, DomainError> {
    let outcome = round.outcome.ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidGameState,
            "Round is not finished; nothing to score",
        )
    })?;

    match outcome {
        RoundOutcome::AllPassed => Ok(ScoreBreakdown {
            outcome,
            declarer: None,
            declarer_made: None,
            deltas: [0; PLAYERS],
            tricks_won: round.tricks_won,
        }),
        RoundOutcome::NoFollowers => {
            let declarer = require_declarer(round, "score_round")?;
            let contract = require_contract(round, "score_round")?;
            let mut deltas = [0i16; PLAYERS];
            // Unopposed: the full positive value, nobody else moves.
            deltas[seat_index(declarer)] = table.contract_value(contract);
            Ok(ScoreBreakdown {
                outcome,
                declarer: Some(declarer),
                declarer_made: Some(true),
                deltas,
                tricks_won: round.tricks_won,
            })
        }
        RoundOutcome::Played => score_played_round(round, table),
    }
}

fn score_played_round(round: &Round, table: &ScoreTable) -> Result<ScoreBreakdown, DomainError> {
    let declarer = require_declarer(round, "score_round")?;
    let contract = require_contract(round, "score_round")?;
    let value = table.contract_value(contract);

    let declarer_tricks = round.tricks_won[seat_index(declarer)];
    let made = match contract.contract_type {
        ContractType::Betl => declarer_tricks == 0,
        ContractType::Suit | ContractType::Sans => declarer_tricks >= contract.tricks_required(),
    };

    let mut deltas = [0i16; PLAYERS];
    deltas[seat_index(declarer)] = if made {
        value
    } else if contract.is_in_hand {
        -value * table.in_hand_fail_factor
    } else {
        -value
    };

    for seat in SEATS {
        if seat == declarer || !round.whist.is_follower(seat) {
            continue;
        }
        let tricks = round.tricks_won[seat_index(seat)];
        deltas[seat_index(seat)] = match contract.contract_type {
            // Betl/Sans followers ride the declarer's result.
            ContractType::Betl | ContractType::Sans => {
                let share = value / 2;
                if made {
                    -share
                } else {
                    share
                }
            }
            ContractType::Suit => follower_delta(table, value, made, tricks),
        };
    }

    Ok(ScoreBreakdown {
        outcome: RoundOutcome::Played,
        declarer: Some(declarer),
        declarer_made: Some(made),
        deltas,
        tricks_won: round.tricks_won,
    })
}

/// Suit-contract follower payout: proportional to tricks taken, with a
/// shortfall penalty when the follower stayed under quota while the
/// declarer still failed.
fn follower_delta(table: &ScoreTable, value: i16, declarer_made: bool, tricks: u8) -> i16 {
    if tricks >= table.follower_quota {
        return tricks as i16 * table.follower_trick_unit;
    }
    if declarer_made {
        // Took none: 0. Took some but under quota: still credited.
        return tricks as i16 * table.follower_trick_unit;
    }
    -((table.follower_quota - tricks) as i16) * value
}

/// Apply per-round scoring to the cumulative totals and transition to
/// Complete.
pub fn apply_round_scoring(
    round: &mut Round,
    table: &ScoreTable,
) -> Result<ScoreBreakdown, DomainError> {
    if round.phase != Phase::Scoring {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "Round is not awaiting scoring",
        ));
    }
    let breakdown = score_round(round, table)?;
    for (total, delta) in round.scores_total.iter_mut().zip(breakdown.deltas.iter()) {
        *total += delta;
    }
    round.phase = Phase::Complete;
    round.turn = None;
    Ok(breakdown)
}
