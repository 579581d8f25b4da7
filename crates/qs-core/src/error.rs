//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `QsError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::{CustomerId, ServerId, TaskId};

/// The top-level error type for `qs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum QsError {
    #[error("instance has no servers")]
    NoServers,

    #[error("average matrix row for {server} has {got} tasks, expected {expected}")]
    RaggedMatrix {
        server:   ServerId,
        expected: usize,
        got:      usize,
    },

    #[error("{client} has {got} real service times, expected one per server ({expected})")]
    ServiceVectorMismatch {
        client:   CustomerId,
        expected: usize,
        got:      usize,
    },

    #[error("{client} requests unknown {task}")]
    UnknownTask { client: CustomerId, task: TaskId },

    #[error("{0} appears more than once in the timeline")]
    DuplicateCustomer(CustomerId),

    #[error("{0} has more than one appointment")]
    DuplicateAppointment(CustomerId),

    #[error("appointment references unknown {0}")]
    UnknownCustomer(CustomerId),

    #[error("unavailability window references unknown {0}")]
    UnknownServer(ServerId),

    #[error("unavailability window on {server} ends ({end}) before it starts ({start})")]
    InvertedWindow { server: ServerId, start: f64, end: f64 },

    /// A time that is NaN or infinite.
    #[error("{field} of {owner} is not a finite time ({value})")]
    NonFiniteTime {
        owner: String,
        field: &'static str,
        value: f64,
    },

    /// A service duration that is negative, NaN, or infinite.
    #[error("{field} of {owner} is not a valid duration ({value})")]
    InvalidDuration {
        owner: String,
        field: &'static str,
        value: f64,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `qs-*` crates.
pub type QsResult<T> = Result<T, QsError>;
