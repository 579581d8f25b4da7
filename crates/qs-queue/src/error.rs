use qs_core::{CustomerId, ServerId};
use thiserror::Error;

use crate::CustomerState;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("{0} appears more than once in the timeline")]
    DuplicateCustomer(CustomerId),

    #[error("{0} not found")]
    UnknownCustomer(CustomerId),

    #[error("{0} not found")]
    UnknownServer(ServerId),

    #[error("{client} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        client: CustomerId,
        from:   CustomerState,
        to:     CustomerState,
    },

    #[error("{server} cannot take work at t={at}")]
    ServerUnavailable { server: ServerId, at: f64 },

    #[error("{client} has no service time on {server}")]
    MissingServiceTime { client: CustomerId, server: ServerId },
}

pub type QueueResult<T> = Result<T, QueueError>;
