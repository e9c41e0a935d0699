//! Uniform action surface: every externally visible move is an `Action`,
//! and `legal_actions` enumerates the complete option set for whoever is
//! expected to act. This keeps callers (HTTP layers, policies, the
//! simulator) thin dispatchers over the phase engines.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{self, BidType};
use crate::domain::contract;
use crate::domain::exchange;
use crate::domain::rules::{BETL_LEVEL, MAX_GAME_BID, SANS_LEVEL, TALON_SIZE};
use crate::domain::state::{Phase, PlayerId, Round};
use crate::domain::tricks;
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// One externally visible move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Bid {
        bid_type: BidType,
        value: Option<u8>,
    },
    PickupTalon,
    Discard {
        cards: Vec<Card>,
    },
    Declare {
        level: u8,
        trump: Option<Suit>,
    },
    Whist {
        hold: bool,
    },
    Play {
        card: Card,
    },
}

/// The complete option set for the current actor, tagged by phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalActions {
    Bid {
        to_act: PlayerId,
        options: Vec<Action>,
    },
    Exchange {
        to_act: PlayerId,
        options: Vec<Action>,
    },
    Declare {
        to_act: PlayerId,
        options: Vec<Action>,
    },
    Whist {
        to_act: PlayerId,
        options: Vec<Action>,
    },
    Play {
        to_act: PlayerId,
        options: Vec<Action>,
    },
    /// Scoring and Complete phases: nobody acts.
    Terminal,
}

impl LegalActions {
    pub fn to_act(&self) -> Option<PlayerId> {
        match self {
            LegalActions::Bid { to_act, .. }
            | LegalActions::Exchange { to_act, .. }
            | LegalActions::Declare { to_act, .. }
            | LegalActions::Whist { to_act, .. }
            | LegalActions::Play { to_act, .. } => Some(*to_act),
            LegalActions::Terminal => None,
        }
    }

    pub fn options(&self) -> &[Action] {
        match self {
            LegalActions::Bid { options, .. }
            | LegalActions::Exchange { options, .. }
            | LegalActions::Declare { options, .. }
            | LegalActions::Whist { options, .. }
            | LegalActions::Play { options, .. } => options,
            LegalActions::Terminal => &[],
        }
    }
}

/// Enumerate the legal actions for the current actor. Never panics;
/// inconsistent states collapse to `Terminal`.
pub fn legal_actions(round: &Round) -> LegalActions {
    match round.phase {
        Phase::Auction => legal_auction_actions(round),
        Phase::Exchanging => legal_exchange_actions(round),
        Phase::Declaring => legal_declare_actions(round),
        Phase::Whisting => legal_whist_actions(round),
        Phase::Trick { .. } => legal_play_actions(round),
        Phase::Scoring | Phase::Complete => LegalActions::Terminal,
    }
}

fn legal_auction_actions(round: &Round) -> LegalActions {
    let Some(to_act) = round.auction.current_bidder else {
        return LegalActions::Terminal;
    };
    let options = bidding::legal_bids(round, to_act)
        .into_iter()
        .map(|b| Action::Bid {
            bid_type: b.bid_type,
            value: b.value,
        })
        .collect();
    LegalActions::Bid { to_act, options }
}

fn legal_exchange_actions(round: &Round) -> LegalActions {
    let Some(to_act) = round.declarer else {
        return LegalActions::Terminal;
    };
    let options = if !round.talon.is_empty() {
        vec![Action::PickupTalon]
    } else {
        // All two-card subsets of the 12-card hand.
        let hand = &round.hands[crate::domain::state::seat_index(to_act)];
        let mut pairs = Vec::new();
        for i in 0..hand.len() {
            for j in (i + 1)..hand.len() {
                pairs.push(Action::Discard {
                    cards: vec![hand[i], hand[j]],
                });
            }
        }
        pairs
    };
    LegalActions::Exchange { to_act, options }
}

fn legal_declare_actions(round: &Round) -> LegalActions {
    let Some(to_act) = round.declarer else {
        return LegalActions::Terminal;
    };
    let min_level = round.contract_min_level.unwrap_or(crate::domain::rules::MIN_GAME_BID);
    let mut options = Vec::new();
    for level in min_level..=SANS_LEVEL {
        if level <= MAX_GAME_BID {
            for trump in Suit::ALL {
                options.push(Action::Declare {
                    level,
                    trump: Some(trump),
                });
            }
        } else {
            debug_assert!(level == BETL_LEVEL || level == SANS_LEVEL);
            options.push(Action::Declare { level, trump: None });
        }
    }
    LegalActions::Declare { to_act, options }
}

fn legal_whist_actions(round: &Round) -> LegalActions {
    let Some(to_act) = round.turn else {
        return LegalActions::Terminal;
    };
    LegalActions::Whist {
        to_act,
        options: vec![Action::Whist { hold: true }, Action::Whist { hold: false }],
    }
}

fn legal_play_actions(round: &Round) -> LegalActions {
    let Some(to_act) = round.turn else {
        return LegalActions::Terminal;
    };
    let options = tricks::legal_moves(round, to_act)
        .into_iter()
        .map(|card| Action::Play { card })
        .collect();
    LegalActions::Play { to_act, options }
}

/// Validate and apply one action on behalf of `who`. Delegates to the
/// phase engines; a rejected action leaves the round untouched.
pub fn apply_action(round: &mut Round, who: PlayerId, action: &Action) -> Result<(), DomainError> {
    match action {
        Action::Bid { bid_type, value } => bidding::place_bid(round, who, *bid_type, *value),
        Action::PickupTalon => exchange::pickup_talon(round, who),
        Action::Discard { cards } => {
            if cards.len() != TALON_SIZE {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDiscard,
                    format!("Must discard exactly {TALON_SIZE} cards"),
                ));
            }
            exchange::discard(round, who, cards)
        }
        Action::Declare { level, trump } => contract::declare_contract(round, who, *level, *trump),
        Action::Whist { hold } => contract::whist_decision(round, who, *hold),
        Action::Play { card } => tricks::play_card(round, who, *card).map(|_| ()),
    }
}

/// Serialize the authoritative round state to JSON.
pub fn to_json(round: &Round) -> Result<String, DomainError> {
    serde_json::to_string(round)
        .map_err(|e| DomainError::validation_other(format!("Serialize round: {e}")))
}

/// Restore a round from its JSON snapshot.
pub fn from_json(json: &str) -> Result<Round, DomainError> {
    serde_json::from_str(json)
        .map_err(|e| DomainError::validation_other(format!("Deserialize round: {e}")))
}
