//! `qs-env`: the decision environment for the queue_sim framework.
//!
//! # Decision loop
//!
//! ```text
//! reset():
//!   rebuild registry / pool / clock from the instance (or a fresh scenario)
//!   advance to the first decision point
//!
//! step(action):
//!   ① Resolve   DecisionStrategy::resolve_action → Hold | Assign | Invalid
//!   ② Apply     Assign:  serve customer, ServerPool::assign, append record,
//!                        reward = DecisionStrategy::compute_reward
//!               Hold:    pop the next event batch
//!               Invalid: penalty, nothing else changes
//!   ③ Advance   pop events until a customer is waiting and a server is
//!               available, or nothing is left (Terminated)
//! ```
//!
//! Episodes are single-threaded and share no state; run independent episodes
//! on separate `DecisionEnv`s.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_env::{EnvBuilder, EnvConfig, NoopObserver};
//! use qs_policy::FirstLegalPolicy;
//!
//! let mut env = EnvBuilder::new(EnvConfig::default()).instance(instance).build()?;
//! let summary = env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod env;
pub mod error;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::EnvBuilder;
pub use config::{EnvConfig, Mode};
pub use env::{DecisionEnv, EnvState, EpisodeSummary, StepKind, StepResult};
pub use error::{EnvError, EnvResult};
pub use observer::{EpisodeObserver, NoopObserver};
