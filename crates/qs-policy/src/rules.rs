//! Rule-based policies.

use qs_core::SimRng;

use crate::{Action, ActionMask, Observation, Policy};

/// Always HOLD.  Every customer eventually abandons.
pub struct HoldPolicy;

impl Policy for HoldPolicy {
    fn decide(&mut self, _observation: &Observation, mask: &ActionMask) -> Action {
        mask.hold()
    }
}

/// Take the lowest-index legal customer, else HOLD.
///
/// With the standard mask this is first-come-first-served, except that
/// urgent appointment holders go first.
pub struct FirstLegalPolicy;

impl Policy for FirstLegalPolicy {
    fn decide(&mut self, _observation: &Observation, mask: &ActionMask) -> Action {
        mask.legal_actions().next().unwrap_or_else(|| mask.hold())
    }
}

/// Pick uniformly among the legal actions (HOLD included).
pub struct RandomLegalPolicy {
    rng: SimRng,
}

impl RandomLegalPolicy {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl Policy for RandomLegalPolicy {
    fn decide(&mut self, _observation: &Observation, mask: &ActionMask) -> Action {
        let legal: Vec<Action> = mask.legal_actions().collect();
        self.rng.choose(&legal).copied().unwrap_or_else(|| mask.hold())
    }
}
