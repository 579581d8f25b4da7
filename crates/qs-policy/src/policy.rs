//! The `Policy` trait: the opaque decision function.

use crate::{Action, ActionMask, Observation};

/// Maps an observation and its legality mask to one action.
///
/// The environment blocks on `decide`; nothing changes while a policy is
/// deciding.  A well-behaved policy only returns actions the mask allows;
/// anything else is penalised by the environment.
///
/// Any `FnMut(&Observation, &ActionMask) -> Action` closure is a `Policy`,
/// which is the easiest way to wrap an external model:
///
/// ```rust,ignore
/// let mut policy = |obs: &Observation, mask: &ActionMask| {
///     model.predict(&obs.flatten(), mask.as_slice())
/// };
/// env.run_episode(&mut policy, &mut NoopObserver)?;
/// ```
pub trait Policy {
    fn decide(&mut self, observation: &Observation, mask: &ActionMask) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Observation, &ActionMask) -> Action,
{
    fn decide(&mut self, observation: &Observation, mask: &ActionMask) -> Action {
        self(observation, mask)
    }
}
