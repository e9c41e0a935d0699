//! Auction engine: bid legality, ordering, termination, declarer selection.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{MAX_GAME_BID, MIN_GAME_BID, PLAYERS};
use crate::domain::state::{is_seat, next_player, Phase, PlayerId, Round, RoundOutcome};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidType {
    Pass,
    /// Plain game bid, value 2..=5; the winner exchanges with the talon.
    Game,
    /// Play with the original hand, no exchange.
    InHand,
    /// Commit to winning zero tricks.
    Betl,
    /// No-trump contract.
    Sans,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub player_id: PlayerId,
    pub bid_type: BidType,
    /// Present only for Game bids (2..=5).
    pub value: Option<u8>,
}

impl Bid {
    pub fn is_pass(&self) -> bool {
        self.bid_type == BidType::Pass
    }

    /// Position in the bid-ranking total order:
    /// pass < game(2) < .. < game(5) < in_hand < betl < sans.
    pub fn rank(&self) -> u8 {
        match self.bid_type {
            BidType::Pass => 0,
            BidType::Game => self.value.unwrap_or(0),
            BidType::InHand => MAX_GAME_BID + 1,
            BidType::Betl => MAX_GAME_BID + 2,
            BidType::Sans => MAX_GAME_BID + 3,
        }
    }
}

/// Bid history and turn bookkeeping, owned by the Round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Ordered bid history, passes included.
    pub bids: Vec<Bid>,
    /// Seat expected to bid; None once the auction is over.
    pub current_bidder: Option<PlayerId>,
    /// Seats that have passed, in pass order.
    pub passed: Vec<PlayerId>,
}

impl Auction {
    pub fn new(first_bidder: PlayerId) -> Self {
        Self {
            bids: Vec::new(),
            current_bidder: Some(first_bidder),
            passed: Vec::new(),
        }
    }

    pub fn has_passed(&self, seat: PlayerId) -> bool {
        self.passed.contains(&seat)
    }

    /// Highest-ranked non-pass bid. Bids strictly increase in rank, so
    /// this is simply the last non-pass entry.
    pub fn highest_bid(&self) -> Option<&Bid> {
        self.bids.iter().rev().find(|b| !b.is_pass())
    }

    pub fn highest_rank(&self) -> u8 {
        self.highest_bid().map(Bid::rank).unwrap_or(0)
    }

    /// Value of the highest Game bid so far, if any.
    pub fn highest_game_value(&self) -> Option<u8> {
        self.bids
            .iter()
            .filter(|b| b.bid_type == BidType::Game)
            .filter_map(|b| b.value)
            .max()
    }

    /// Special bid types (in_hand/betl/sans) are playable once per auction.
    pub fn has_bid_type(&self, bid_type: BidType) -> bool {
        self.bids.iter().any(|b| b.bid_type == bid_type)
    }

    pub fn has_any_bid(&self) -> bool {
        self.bids.iter().any(|b| !b.is_pass())
    }
}

/// Compute the legal bids for `who`. Empty unless the auction is open and
/// it is `who`'s turn.
pub fn legal_bids(round: &Round, who: PlayerId) -> Vec<Bid> {
    if round.phase != Phase::Auction {
        return Vec::new();
    }
    if round.auction.current_bidder != Some(who) {
        return Vec::new();
    }

    let auction = &round.auction;
    let mut bids = vec![Bid {
        player_id: who,
        bid_type: BidType::Pass,
        value: None,
    }];

    // The single next game value: smallest unbid value above the current
    // highest game bid (no jumping).
    let next_game = match auction.highest_game_value() {
        None => Some(MIN_GAME_BID),
        Some(v) if v < MAX_GAME_BID => Some(v + 1),
        Some(_) => None,
    };
    if let Some(value) = next_game {
        // A game bid must also outrank any special bid already on the table.
        let candidate = Bid {
            player_id: who,
            bid_type: BidType::Game,
            value: Some(value),
        };
        if candidate.rank() > auction.highest_rank() {
            bids.push(candidate);
        }
    }

    for bid_type in [BidType::InHand, BidType::Betl, BidType::Sans] {
        if auction.has_bid_type(bid_type) {
            continue;
        }
        let candidate = Bid {
            player_id: who,
            bid_type,
            value: None,
        };
        if candidate.rank() > auction.highest_rank() {
            bids.push(candidate);
        }
    }

    bids
}

/// Place a bid, enforcing turn order and the bid-ranking total order.
pub fn place_bid(
    round: &mut Round,
    who: PlayerId,
    bid_type: BidType,
    value: Option<u8>,
) -> Result<(), DomainError> {
    if round.phase != Phase::Auction {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameState,
            "Bidding is only allowed during the auction",
        ));
    }
    if round.auction.current_bidder != Some(who) {
        return Err(DomainError::validation(
            ValidationKind::NotPlayerTurn,
            format!("Not seat {who}'s turn to bid"),
        ));
    }

    let bid = Bid {
        player_id: who,
        bid_type,
        value,
    };
    validate_bid(&round.auction, &bid)?;

    round.auction.bids.push(bid);
    if bid.is_pass() {
        round.auction.passed.push(who);
    }
    advance_auction(round);
    Ok(())
}

fn validate_bid(auction: &Auction, bid: &Bid) -> Result<(), DomainError> {
    match bid.bid_type {
        BidType::Pass => Ok(()),
        BidType::Game => {
            let value = bid.value.ok_or_else(|| {
                DomainError::validation(ValidationKind::IllegalBid, "Game bid requires a value")
            })?;
            if !(MIN_GAME_BID..=MAX_GAME_BID).contains(&value) {
                return Err(DomainError::validation(
                    ValidationKind::IllegalBid,
                    format!("Game bid must be between {MIN_GAME_BID} and {MAX_GAME_BID}"),
                ));
            }
            // No jumping: the only legal game bid is the successor of the
            // current highest game value.
            let expected = auction
                .highest_game_value()
                .map(|v| v + 1)
                .unwrap_or(MIN_GAME_BID);
            if value != expected {
                return Err(DomainError::validation(
                    ValidationKind::IllegalBid,
                    format!("Must bid exactly {expected}"),
                ));
            }
            if bid.rank() <= auction.highest_rank() {
                return Err(DomainError::validation(
                    ValidationKind::IllegalBid,
                    "Bid does not outrank the current highest bid",
                ));
            }
            Ok(())
        }
        BidType::InHand | BidType::Betl | BidType::Sans => {
            if bid.value.is_some() {
                return Err(DomainError::validation(
                    ValidationKind::IllegalBid,
                    "Special bids carry no value",
                ));
            }
            if auction.has_bid_type(bid.bid_type) {
                return Err(DomainError::validation(
                    ValidationKind::IllegalBid,
                    format!("{:?} has already been bid this auction", bid.bid_type),
                ));
            }
            if bid.rank() <= auction.highest_rank() {
                return Err(DomainError::validation(
                    ValidationKind::IllegalBid,
                    "Bid does not outrank the current highest bid",
                ));
            }
            Ok(())
        }
    }
}

/// Advance to the next bidder or end the auction.
fn advance_auction(round: &mut Round) {
    let passed = round.auction.passed.len();

    if passed == PLAYERS && !round.auction.has_any_bid() {
        // Everyone passed with no bid on the table: redeal.
        round.auction.current_bidder = None;
        round.turn = None;
        round.outcome = Some(RoundOutcome::AllPassed);
        round.phase = Phase::Complete;
        return;
    }

    if passed == PLAYERS - 1 && round.auction.has_any_bid() {
        finalize_auction(round);
        return;
    }

    // Move to the next seat in fixed rotation, skipping passed players.
    let Some(current) = round.auction.current_bidder else {
        return;
    };
    let mut seat = next_player(current);
    while round.auction.has_passed(seat) {
        seat = next_player(seat);
    }
    round.auction.current_bidder = Some(seat);
    round.turn = Some(seat);
}

/// Set up the declarer once a single non-passed bidder remains.
fn finalize_auction(round: &mut Round) {
    let Some(winner_bid) = round.auction.highest_bid().copied() else {
        return;
    };
    debug_assert!(
        is_seat(winner_bid.player_id) && !round.auction.has_passed(winner_bid.player_id),
        "winning bid must belong to the remaining active bidder"
    );

    let declarer = winner_bid.player_id;
    round.declarer = Some(declarer);
    round.contract_min_level = Some(match winner_bid.bid_type {
        BidType::Game => winner_bid.value.unwrap_or(MIN_GAME_BID),
        _ => MIN_GAME_BID,
    });
    round.auction.current_bidder = None;

    // Plain game winners exchange with the talon; in_hand/betl/sans
    // winners declare straight away.
    round.phase = if winner_bid.bid_type == BidType::Game {
        Phase::Exchanging
    } else {
        Phase::Declaring
    };
    round.turn = Some(declarer);
}
