//! Error types for qs-eval.

use std::path::PathBuf;

use qs_core::QsError;
use qs_env::EnvError;
use qs_output::OutputError;
use thiserror::Error;

/// Errors that abort a batch before it can be scored.
///
/// An invalid schedule is *not* an error: it ends the batch with the
/// sentinel score and is reported in the [`BatchReport`][crate::BatchReport].
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error("instance {id} is malformed: {source}")]
    Instance { id: u32, source: QsError },

    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    #[error("schedule output error: {0}")]
    Output(#[from] OutputError),
}

/// Alias for `Result<T, EvalError>`.
pub type EvalResult<T> = Result<T, EvalError>;
