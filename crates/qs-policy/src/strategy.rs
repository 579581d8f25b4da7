//! The `DecisionStrategy` trait: the scenario-specific half of the environment.

use qs_core::CustomerId;
use qs_queue::Customer;

use crate::{Action, ActionMask, EnvView, Observation};

/// What an action means at the current decision point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Defer: assign nobody and let time advance.
    Hold,
    /// Admit this waiting customer to the selected server.
    Assign(CustomerId),
    /// Out of range or not legal now.  Penalised; state is left unchanged.
    Invalid,
}

/// Encodes state, interprets actions, and scores services for one scenario.
///
/// The environment owns the clock, registry, and server pool and calls these
/// four operations at each decision point with a read-only [`EnvView`].
/// Implementations hold configuration only; they never see mutable state.
///
/// # Example
///
/// ```rust,ignore
/// struct WalkInsOnly(QueueStrategy);
///
/// impl DecisionStrategy for WalkInsOnly {
///     fn compute_mask(&self, view: &EnvView<'_>) -> ActionMask {
///         let mut mask = ActionMask::hold_only(self.0.capacity());
///         for (i, c) in self.0.visible(view).iter().enumerate() {
///             if !view.appointments.has(c.id) { mask.allow(i); }
///         }
///         mask
///     }
///     // ... delegate the rest to self.0
/// }
/// ```
pub trait DecisionStrategy: Send + 'static {
    /// Visible queue capacity `K`.  Actions are `0..=K`, with `K` meaning HOLD.
    fn capacity(&self) -> usize;

    /// Encode the current state for the policy.
    fn build_observation(&self, view: &EnvView<'_>) -> Observation;

    /// Interpret `action` against the current state.
    fn resolve_action(&self, view: &EnvView<'_>, action: Action) -> Resolution;

    /// Reward for admitting `customer` at `view.now`.
    ///
    /// Called only for real assignments, never for HOLD or invalid actions.
    fn compute_reward(&self, view: &EnvView<'_>, customer: &Customer) -> f64;

    /// Which actions are legal now.  HOLD must always be legal.
    fn compute_mask(&self, view: &EnvView<'_>) -> ActionMask;
}
