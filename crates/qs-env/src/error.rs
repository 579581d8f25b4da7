use qs_core::QsError;
use qs_queue::QueueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("environment configuration error: {0}")]
    Config(String),

    #[error("instance error: {0}")]
    Instance(#[from] QsError),

    #[error("queue state error: {0}")]
    Queue(#[from] QueueError),

    #[error("episode has terminated; call reset()")]
    Terminated,

    #[error("no server is waiting for a decision")]
    NoDecisionPending,

    #[error("policy returned {0} invalid actions in a row without progress")]
    PolicyStuck(usize),
}

pub type EnvResult<T> = Result<T, EnvError>;
