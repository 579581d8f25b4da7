//! `qs-queue`: the mutable simulation state of one episode.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`customer`]    | `Customer`, `CustomerState`, `CustomerRegistry`            |
//! | [`appointment`] | `AppointmentBook`: appointment lookup by customer         |
//! | [`server`]      | `Server`, `ServerPool`, `Assignment`                       |
//! | [`clock`]       | `EventEngine`, `Event`: the only thing that moves time    |
//! | [`error`]       | `QueueError`, `QueueResult<T>`                             |
//!
//! # Lifecycle (summary)
//!
//! ```text
//! Pending ──Arrival event──▶ Waiting ──serve()──────────▶ Served
//!                               └──now ≥ abandonment────▶ Abandoned
//! ```
//!
//! Served and Abandoned customers leave the waiting set and are never seen by
//! the decision layer again.

pub mod appointment;
pub mod clock;
pub mod customer;
pub mod error;
pub mod server;


pub use appointment::AppointmentBook;
pub use clock::{Event, EventEngine};
pub use customer::{Customer, CustomerRegistry, CustomerState};
pub use error::{QueueError, QueueResult};
pub use server::{Assignment, Server, ServerPool};

#[cfg(feature = "fx-hash")]
pub(crate) type IdMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type IdMap<K, V> = std::collections::HashMap<K, V>;
