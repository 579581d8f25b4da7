//! `qs-policy`: everything the decision layer sees and returns.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`action`]        | `Action`, `ActionMask`                                    |
//! | [`observation`]   | `Observation`: fixed-shape view for a learned policy     |
//! | [`context`]       | `EnvView<'a>`: read-only snapshot at a decision point    |
//! | [`strategy`]      | `DecisionStrategy` trait, `Resolution`                    |
//! | [`queue`]         | `QueueStrategy`: the standard observation/mask/reward    |
//! | [`reward`]        | piecewise service reward                                  |
//! | [`policy`]        | `Policy` trait (`decide(observation, mask) -> Action`)    |
//! | [`rules`]         | `HoldPolicy`, `FirstLegalPolicy`, `RandomLegalPolicy`     |
//!
//! # Design notes
//!
//! The environment in `qs-env` is a fixed engine.  Everything scenario-specific
//! about a decision (how the state is encoded, which actions are legal, what an
//! action means, how a service is scored) lives behind `DecisionStrategy`, so a
//! new scenario is a new strategy, not a new environment.
//!
//! `Policy` is the opaque decision function.  A trained model is just another
//! `Policy` implementation living outside this workspace; nothing here depends
//! on a model format.

pub mod action;
pub mod context;
pub mod observation;
pub mod policy;
pub mod queue;
pub mod reward;
pub mod rules;
pub mod strategy;


pub use action::{Action, ActionMask};
pub use context::EnvView;
pub use observation::Observation;
pub use policy::Policy;
pub use queue::QueueStrategy;
pub use rules::{FirstLegalPolicy, HoldPolicy, RandomLegalPolicy};
pub use strategy::{DecisionStrategy, Resolution};
