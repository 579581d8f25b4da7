//! Episode observer trait for progress reporting and data collection.

use qs_core::{AssignmentRecord, CustomerId};

use crate::{EpisodeSummary, StepResult};

/// Callbacks invoked by [`DecisionEnv::run_episode`][crate::DecisionEnv::run_episode].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: assignment counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl EpisodeObserver for Counter {
///     fn on_assignment(&mut self, _record: &AssignmentRecord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait EpisodeObserver {
    /// Called at each decision point, before the policy is asked.
    fn on_decision(&mut self, _now: f64, _waiting: usize) {}

    /// Called when a customer is admitted to a server.
    fn on_assignment(&mut self, _record: &AssignmentRecord) {}

    /// Called when a waiting customer's deadline passes.
    fn on_abandon(&mut self, _now: f64, _customer: CustomerId) {}

    /// Called after every step, whatever its outcome.
    fn on_step(&mut self, _step: &StepResult) {}

    /// Called once when the episode reaches its terminal state.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {}
}

/// An [`EpisodeObserver`] that does nothing.
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}
