//! Round construction: deal and open the auction.

use crate::domain::bidding::Auction;
use crate::domain::contract::WhistRecord;
use crate::domain::dealing::deal_round;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{Phase, Round};
use crate::errors::domain::DomainError;

/// First bidder of every deal (fixed seating, seat 1 opens).
pub const FIRST_BIDDER: u8 = 1;

/// Deal a fresh round and open the auction with seat 1 to act.
///
/// `scores_total` carries the players' cumulative scores into the round;
/// a given seed reproduces the deal exactly.
pub fn new_round(
    round_no: u32,
    seed: u64,
    scores_total: [i16; PLAYERS],
) -> Result<Round, DomainError> {
    let deal = deal_round(seed)?;
    Ok(Round {
        phase: Phase::Auction,
        round_no,
        hands: deal.hands,
        talon: deal.talon,
        discarded: Vec::new(),
        auction: Auction::new(FIRST_BIDDER),
        declarer: None,
        contract_min_level: None,
        contract: None,
        whist: WhistRecord::default(),
        trick_plays: Vec::new(),
        trick_lead: None,
        leader: None,
        turn: Some(FIRST_BIDDER),
        tricks: Vec::new(),
        tricks_won: [0; PLAYERS],
        scores_total,
        outcome: None,
    })
}
