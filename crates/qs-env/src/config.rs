//! Environment configuration.

use serde::{Deserialize, Serialize};

use qs_policy::queue::DEFAULT_QUEUE_CAPACITY;

/// Why the episode is being run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Learning: each reset may draw a fresh scenario from a generator.
    Train,
    /// Evaluation on a fixed instance.
    #[default]
    Test,
}

/// Top-level environment configuration.
///
/// Typically embedded in a batch configuration file; every field has a
/// default so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub mode: Mode,

    /// Visible queue capacity `K`.  Actions `0..K` pick a customer; `K` is HOLD.
    pub queue_capacity: usize,

    /// Reward for an action that is out of range or masked out.
    pub invalid_action_penalty: f64,

    /// Master seed for scenario generation in `Train` mode.
    pub seed: u64,

    /// `run_episode` gives up after this many consecutive invalid actions,
    /// since an invalid action leaves the state (and so the next observation)
    /// unchanged.
    pub max_invalid_streak: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            mode:                   Mode::Test,
            queue_capacity:         DEFAULT_QUEUE_CAPACITY,
            invalid_action_penalty: -100.0,
            seed:                   0,
            max_invalid_streak:     1_000,
        }
    }
}
