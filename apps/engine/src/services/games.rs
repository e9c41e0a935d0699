//! Concurrent game registry.
//!
//! Each game is guarded by its own mutex; every external operation is one
//! lookup+mutate pair under that lock, so two requests for the same game
//! can never apply out of order. Cross-game operations need no
//! coordination.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::actions::{self, LegalActions};
use crate::domain::bidding::{self, BidType};
use crate::domain::contract;
use crate::domain::exchange;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{self, ScoreBreakdown, ScoreTable};
use crate::domain::state::{Phase, PlayerId, Round, RoundOutcome};
use crate::domain::tricks;
use crate::domain::{derive_dealing_seed, new_round, Card, Suit};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// One game: its seed, deal bookkeeping, and the live round.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: Uuid,
    /// Base seed all dealing seeds derive from.
    pub seed: u64,
    /// Round number of the live round (unchanged by all-pass redeals).
    pub round_no: u32,
    /// Total deals so far, redeals included.
    pub deal_no: u32,
    pub round: Round,
    /// Per-round score breakdowns, oldest first, for display.
    pub history: Vec<ScoreBreakdown>,
}

/// Registry of concurrent games keyed by id.
pub struct GameService {
    games: DashMap<Uuid, Arc<Mutex<GameSession>>>,
    score_table: ScoreTable,
}

impl GameService {
    pub fn new() -> Self {
        Self::with_score_table(ScoreTable::default())
    }

    /// Use a custom payout table for every game this service hosts.
    pub fn with_score_table(score_table: ScoreTable) -> Self {
        Self {
            games: DashMap::new(),
            score_table,
        }
    }

    /// Create a game and deal its first round. A missing seed is drawn
    /// from the process RNG; passing one makes the whole game replayable.
    pub fn create_game(&self, seed: Option<u64>) -> Result<Uuid, DomainError> {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        let id = Uuid::new_v4();
        let round = new_round(1, derive_dealing_seed(seed, 1), [0; PLAYERS])?;
        let session = GameSession {
            id,
            seed,
            round_no: 1,
            deal_no: 1,
            round,
            history: Vec::new(),
        };
        self.games.insert(id, Arc::new(Mutex::new(session)));
        info!(game_id = %id, seed, "Created game");
        Ok(id)
    }

    /// Drop a finished (or abandoned) game from the registry.
    pub fn remove_game(&self, game_id: Uuid) -> Result<(), DomainError> {
        self.games
            .remove(&game_id)
            .map(|_| ())
            .ok_or_else(|| game_not_found(game_id))
    }

    /// Run `f` against the session under the per-game lock. This is the
    /// single entry point every mutation goes through: the lookup and the
    /// mutation are one atomic unit.
    pub fn with_game<T>(
        &self,
        game_id: Uuid,
        f: impl FnOnce(&mut GameSession) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let entry = self
            .games
            .get(&game_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| game_not_found(game_id))?;
        let mut session = entry.lock();
        f(&mut session)
    }

    /// Snapshot of the live round.
    pub fn round(&self, game_id: Uuid) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| Ok(session.round.clone()))
    }

    /// Legal actions for the live round's current actor.
    pub fn legal_actions(&self, game_id: Uuid) -> Result<LegalActions, DomainError> {
        self.with_game(game_id, |session| Ok(actions::legal_actions(&session.round)))
    }

    pub fn place_bid(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        bid_type: BidType,
        value: Option<u8>,
    ) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            bidding::place_bid(&mut session.round, player_id, bid_type, value)?;
            debug!(game_id = %game_id, player_id, ?bid_type, value, "Accepted bid");
            Ok(session.round.clone())
        })
    }

    pub fn pickup_talon(&self, game_id: Uuid, player_id: PlayerId) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            exchange::pickup_talon(&mut session.round, player_id)?;
            debug!(game_id = %game_id, player_id, "Talon picked up");
            Ok(session.round.clone())
        })
    }

    pub fn discard(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        cards: &[Card],
    ) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            exchange::discard(&mut session.round, player_id, cards)?;
            debug!(game_id = %game_id, player_id, "Exchange committed");
            Ok(session.round.clone())
        })
    }

    pub fn declare_contract(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        level: u8,
        trump: Option<Suit>,
    ) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            contract::declare_contract(&mut session.round, player_id, level, trump)?;
            info!(game_id = %game_id, player_id, level, ?trump, "Contract declared");
            Ok(session.round.clone())
        })
    }

    pub fn whist_decision(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        hold: bool,
    ) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            contract::whist_decision(&mut session.round, player_id, hold)?;
            debug!(game_id = %game_id, player_id, hold, "Whist decision");
            Ok(session.round.clone())
        })
    }

    pub fn play_card(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        card: Card,
    ) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            let result = tricks::play_card(&mut session.round, player_id, card)?;
            debug!(
                game_id = %game_id,
                player_id,
                trick_completed = result.trick_completed,
                trick_winner = result.trick_winner,
                "Card played"
            );
            Ok(session.round.clone())
        })
    }

    /// Score the finished round and fold the deltas into the totals.
    pub fn score_round(&self, game_id: Uuid) -> Result<ScoreBreakdown, DomainError> {
        let table = self.score_table.clone();
        self.with_game(game_id, move |session| {
            let breakdown = scoring::apply_round_scoring(&mut session.round, &table)?;
            info!(
                game_id = %game_id,
                outcome = ?breakdown.outcome,
                declarer = breakdown.declarer,
                "Round scored"
            );
            session.history.push(breakdown.clone());
            Ok(breakdown)
        })
    }

    /// Start the next deal once the live round is complete. An all-pass
    /// round is redealt under the same round number; otherwise the round
    /// number advances. Either way the shuffle is fresh.
    pub fn next_round(&self, game_id: Uuid) -> Result<Round, DomainError> {
        self.with_game(game_id, |session| {
            if session.round.phase != Phase::Complete {
                return Err(DomainError::validation(
                    ValidationKind::InvalidGameState,
                    "Current round is not complete",
                ));
            }
            if session.round.outcome != Some(RoundOutcome::AllPassed) {
                session.round_no += 1;
            }
            session.deal_no += 1;
            let scores = session.round.scores_total;
            let seed = derive_dealing_seed(session.seed, session.deal_no);
            session.round = new_round(session.round_no, seed, scores)?;
            info!(
                game_id = %game_id,
                round_no = session.round_no,
                deal_no = session.deal_no,
                "Dealt next round"
            );
            Ok(session.round.clone())
        })
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}

fn game_not_found(game_id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}
