//! Error types for qs-validate.

use thiserror::Error;

use crate::ScheduleFormat;

/// Errors that can occur when loading a schedule file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No supported format parsed the whole file.
    #[error("schedule unreadable: {}", describe(.attempts))]
    Unreadable { attempts: Vec<(ScheduleFormat, String)> },
}

fn describe(attempts: &[(ScheduleFormat, String)]) -> String {
    attempts
        .iter()
        .map(|(format, reason)| format!("{format}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Alias for `Result<T, ReadError>`.
pub type ReadResult<T> = Result<T, ReadError>;
