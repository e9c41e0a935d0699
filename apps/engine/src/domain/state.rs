use serde::{Deserialize, Serialize};

use crate::domain::bidding::Auction;
use crate::domain::contract::{Contract, WhistRecord};
use crate::domain::rules::PLAYERS;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

/// Fixed seats 1..=3; rotation is 1 → 2 → 3 → 1.
pub type PlayerId = u8;

pub const SEATS: [PlayerId; PLAYERS] = [1, 2, 3];

/// Round progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Players place bids in fixed turn order.
    Auction,
    /// Declarer picks up the talon and discards two cards.
    Exchanging,
    /// Declarer announces the contract.
    Declaring,
    /// Defenders decide whether to oppose the declarer.
    Whisting,
    /// Playing tricks; `trick_no` is 1-based.
    Trick { trick_no: u8 },
    /// Tally round scores.
    Scoring,
    /// Round complete.
    Complete,
}

/// Terminal resolution of a round, set once known.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundOutcome {
    /// All three players passed with no bid; the round is redealt unscored.
    AllPassed,
    /// Both defenders declined to whist; the declarer wins unopposed.
    NoFollowers,
    /// The round was decided by trick play.
    Played,
}

/// A completed trick (exactly three plays).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub number: u8,
    pub leader: PlayerId,
    pub plays: Vec<(PlayerId, Card)>,
    pub winner: PlayerId,
}

/// Entire round container, sufficient for pure domain operations.
///
/// This is the authoritative serializable snapshot: serialize →
/// deserialize must preserve the phase and the legal-action set exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Current phase of the round.
    pub phase: Phase,
    /// Round number (1-based; unchanged by an all-pass redeal).
    pub round_no: u32,
    /// Players' hands, indexed by seat.
    pub hands: [Vec<Card>; PLAYERS],
    /// Face-down cards set aside: the dealt talon, empty while the
    /// declarer holds all twelve cards, then the two discards.
    pub talon: Vec<Card>,
    /// Exchange record: the declarer's two discards (empty until the
    /// exchange commits).
    pub discarded: Vec<Card>,
    /// Bid history and auction bookkeeping.
    pub auction: Auction,
    /// Auction winner (once determined).
    pub declarer: Option<PlayerId>,
    /// Minimum contract level seeded from the winning bid.
    pub contract_min_level: Option<u8>,
    /// Declared contract.
    pub contract: Option<Contract>,
    /// Whist decisions of the two defenders.
    pub whist: WhistRecord,
    /// Ordered plays for the current trick (who, card).
    pub trick_plays: Vec<(PlayerId, Card)>,
    /// Lead suit for the current trick.
    pub trick_lead: Option<Suit>,
    /// Player who leads the current trick (only meaningful in Trick phase).
    pub leader: Option<PlayerId>,
    /// Player whose turn it is to act; None when nobody can act.
    pub turn: Option<PlayerId>,
    /// Completed tricks in play order.
    pub tricks: Vec<Trick>,
    /// Tricks won per seat for this round.
    pub tricks_won: [u8; PLAYERS],
    /// Cumulative scores across rounds, carried into each new round.
    pub scores_total: [i16; PLAYERS],
    /// Terminal resolution, set when the round reaches Scoring/Complete.
    pub outcome: Option<RoundOutcome>,
}

/// Seat / turn math helpers (3 fixed seats: 1..=3).
///
/// These live in `domain` so every layer (engines, services, policies)
/// shares a single source of truth for rotation and "who acts next".
#[inline]
pub fn seat_index(seat: PlayerId) -> usize {
    debug_assert!(is_seat(seat), "seat must be 1..=3");
    (seat - 1) as usize
}

#[inline]
pub fn is_seat(seat: PlayerId) -> bool {
    (1..=PLAYERS as u8).contains(&seat)
}

/// Returns the next player clockwise (1 → 2 → 3 → 1).
#[inline]
pub fn next_player(p: PlayerId) -> PlayerId {
    p % PLAYERS as u8 + 1
}

/// Returns the previous player (1 ← 2 ← 3 ← 1).
#[inline]
pub fn prev_player(p: PlayerId) -> PlayerId {
    (p + 1) % PLAYERS as u8 + 1
}

/// Expected actor seat during a trick.
///
/// `leader` is the trick leader; `play_count` is how many cards have
/// already been played into the trick.
#[inline]
pub fn expected_actor(leader: PlayerId, play_count: u8) -> PlayerId {
    let mut seat = leader;
    for _ in 0..play_count {
        seat = next_player(seat);
    }
    seat
}

pub fn require_declarer(round: &Round, ctx: &'static str) -> Result<PlayerId, DomainError> {
    round.declarer.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: declarer must be set ({ctx})"))
    })
}

pub fn require_contract<'a>(round: &'a Round, ctx: &'static str) -> Result<&'a Contract, DomainError> {
    round.contract.as_ref().ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: contract must be set ({ctx})"))
    })
}

pub fn require_turn(round: &Round, ctx: &'static str) -> Result<PlayerId, DomainError> {
    round.turn.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: turn must be set ({ctx})"))
    })
}

pub fn require_min_level(round: &Round, ctx: &'static str) -> Result<u8, DomainError> {
    round.contract_min_level.ok_or_else(|| {
        DomainError::validation_other(format!(
            "Invariant violated: contract_min_level must be set ({ctx})"
        ))
    })
}
