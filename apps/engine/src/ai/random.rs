//! Uniformly random policy, mainly for simulation and fuzzing.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ai::trait_def::{Policy, PolicyError};
use crate::domain::actions::{Action, LegalActions};
use crate::domain::Round;

/// Picks uniformly from the legal option list. Deterministic for a given
/// seed and action sequence.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(
        &mut self,
        _round: &Round,
        legal: &LegalActions,
    ) -> Result<Action, PolicyError> {
        let options = legal.options();
        if options.is_empty() {
            return Err(PolicyError::NoLegalActions);
        }
        let idx = self.rng.random_range(0..options.len());
        Ok(options[idx].clone())
    }
}
