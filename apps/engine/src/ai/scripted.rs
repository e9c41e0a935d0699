//! Scripted policy: replays a fixed action sequence.
//!
//! Used in tests to drive a round deterministically through the engine's
//! public action surface.

use std::collections::VecDeque;

use crate::ai::trait_def::{Policy, PolicyError};
use crate::domain::actions::{Action, LegalActions};
use crate::domain::Round;

pub struct ScriptedPolicy {
    queue: VecDeque<Action>,
}

impl ScriptedPolicy {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Policy for ScriptedPolicy {
    fn choose_action(
        &mut self,
        _round: &Round,
        _legal: &LegalActions,
    ) -> Result<Action, PolicyError> {
        self.queue
            .pop_front()
            .ok_or_else(|| PolicyError::Internal("script exhausted".into()))
    }
}
