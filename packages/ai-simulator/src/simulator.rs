//! In-memory round simulator for policy evaluation.
//!
//! Drives complete rounds through the engine's public action surface,
//! exactly as a server would, but without any transport in the way.

use preferans_engine::domain::actions::{apply_action, legal_actions};
use preferans_engine::domain::scoring::{apply_round_scoring, ScoreTable};
use preferans_engine::domain::state::seat_index;
use preferans_engine::domain::{derive_dealing_seed, new_round};
use preferans_engine::{DomainError, Phase, Policy, PolicyError, RoundOutcome};
use serde::Serialize;
use tracing::debug;

const PLAYERS: usize = 3;

/// Hard cap on actions per deal; a correct engine never gets close.
const MAX_STEPS: u32 = 200;

#[derive(Debug)]
pub enum SimulatorError {
    Domain(DomainError),
    Policy(PolicyError),
    /// The deal failed to terminate within the step budget.
    Runaway,
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Domain(e) => write!(f, "domain error: {e}"),
            SimulatorError::Policy(e) => write!(f, "policy error: {e}"),
            SimulatorError::Runaway => write!(f, "deal exceeded the step budget"),
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<DomainError> for SimulatorError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<PolicyError> for SimulatorError {
    fn from(e: PolicyError) -> Self {
        Self::Policy(e)
    }
}

/// Outcome of one simulated deal.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round_no: u32,
    pub outcome: RoundOutcome,
    pub declarer: Option<u8>,
    pub declarer_made: Option<bool>,
    pub deltas: [i16; PLAYERS],
    pub tricks_won: [u8; PLAYERS],
}

/// Drives one policy per seat through consecutive deals of one game.
pub struct Simulator {
    policies: [Box<dyn Policy>; PLAYERS],
    score_table: ScoreTable,
    game_seed: u64,
    round_no: u32,
    deal_no: u32,
    scores_total: [i16; PLAYERS],
}

impl Simulator {
    pub fn new(game_seed: u64, policies: [Box<dyn Policy>; PLAYERS]) -> Self {
        Self {
            policies,
            score_table: ScoreTable::default(),
            game_seed,
            round_no: 1,
            deal_no: 0,
            scores_total: [0; PLAYERS],
        }
    }

    pub fn scores_total(&self) -> [i16; PLAYERS] {
        self.scores_total
    }

    /// Deal and play one round to completion.
    ///
    /// An all-pass deal reports as `AllPassed` and the next call redeals
    /// under the same round number; otherwise the round number advances.
    pub fn play_round(&mut self) -> Result<RoundReport, SimulatorError> {
        self.deal_no += 1;
        let seed = derive_dealing_seed(self.game_seed, self.deal_no);
        let mut round = new_round(self.round_no, seed, self.scores_total)?;
        debug!(round_no = self.round_no, deal_no = self.deal_no, "Dealt round");

        let mut steps = 0;
        while !matches!(round.phase, Phase::Scoring | Phase::Complete) {
            steps += 1;
            if steps > MAX_STEPS {
                return Err(SimulatorError::Runaway);
            }

            let legal = legal_actions(&round);
            let Some(to_act) = legal.to_act() else { break };
            let policy = &mut self.policies[seat_index(to_act)];
            let action = policy.choose_action(&round, &legal)?;
            apply_action(&mut round, to_act, &action)?;
        }

        let report = if round.phase == Phase::Scoring {
            let breakdown = apply_round_scoring(&mut round, &self.score_table)?;
            RoundReport {
                round_no: self.round_no,
                outcome: breakdown.outcome,
                declarer: breakdown.declarer,
                declarer_made: breakdown.declarer_made,
                deltas: breakdown.deltas,
                tricks_won: breakdown.tricks_won,
            }
        } else {
            // Complete without a scoring pass: the all-pass redeal case.
            RoundReport {
                round_no: self.round_no,
                outcome: round.outcome.unwrap_or(RoundOutcome::AllPassed),
                declarer: None,
                declarer_made: None,
                deltas: [0; PLAYERS],
                tricks_won: round.tricks_won,
            }
        };

        self.scores_total = round.scores_total;
        if report.outcome != RoundOutcome::AllPassed {
            self.round_no += 1;
        }
        Ok(report)
    }
}
