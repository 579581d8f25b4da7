//! `qs-core`: foundational types for the `queue_sim` framework.
//!
//! Every other `qs-*` crate depends on this one.  It has no `qs-*`
//! dependencies and few external ones (`rand`, `serde`, `thiserror`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `CustomerId`, `ServerId`, `TaskId`                         |
//! | [`time`]        | `SimTime`, `EPSILON`, `approx_eq`                          |
//! | [`instance`]    | `Instance`, `ArrivalStep`, `Appointment`, `Unavailability` |
//! | [`record`]      | `AssignmentRecord`: one schedule row                      |
//! | [`rng`]         | `SimRng`                                                   |
//! | [`generator`]   | `ScenarioGenerator`: random instances for training runs   |
//! | [`error`]       | `QsError`, `QsResult`                                      |

pub mod error;
pub mod generator;
pub mod ids;
pub mod instance;
pub mod record;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{QsError, QsResult};
pub use generator::ScenarioGenerator;
pub use ids::{CustomerId, ServerId, TaskId};
pub use instance::{Appointment, ArrivalStep, Instance, Unavailability};
pub use record::AssignmentRecord;
pub use rng::SimRng;
pub use time::{EPSILON, MINUTES_PER_DAY, SimTime, approx_eq};
