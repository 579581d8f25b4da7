//! Loading schedule files.
//!
//! Schedules arrive from different producers with either `;` or `,` as the
//! field delimiter.  Each [`ScheduleFormat`] in [`ScheduleFormat::ORDER`] is
//! tried in turn; a format is accepted only if its header has a `client`
//! column and every row deserializes into an [`AssignmentRecord`].

use std::fmt;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use qs_core::{AssignmentRecord, Instance};
use tracing::debug;

use crate::{ReadError, ReadResult, Violation, validate};

/// A supported schedule file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleFormat {
    Semicolon,
    Comma,
}

impl ScheduleFormat {
    /// Formats in the order they are tried.
    pub const ORDER: [ScheduleFormat; 2] = [ScheduleFormat::Semicolon, ScheduleFormat::Comma];

    pub fn delimiter(self) -> u8 {
        match self {
            ScheduleFormat::Semicolon => b';',
            ScheduleFormat::Comma     => b',',
        }
    }
}

impl fmt::Display for ScheduleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleFormat::Semicolon => write!(f, "semicolon-delimited"),
            ScheduleFormat::Comma     => write!(f, "comma-delimited"),
        }
    }
}

/// Read the schedule at `path`, returning its records and the format that
/// parsed it.
pub fn read_schedule(path: &Path) -> ReadResult<(Vec<AssignmentRecord>, ScheduleFormat)> {
    let bytes = std::fs::read(path)?;
    read_schedule_bytes(&bytes)
}

/// [`read_schedule`] over an in-memory file.
pub fn read_schedule_bytes(bytes: &[u8]) -> ReadResult<(Vec<AssignmentRecord>, ScheduleFormat)> {
    let mut attempts = Vec::with_capacity(ScheduleFormat::ORDER.len());
    for format in ScheduleFormat::ORDER {
        match parse(bytes, format) {
            Ok(records) => {
                debug!(%format, rows = records.len(), "schedule read");
                return Ok((records, format));
            }
            Err(reason) => attempts.push((format, reason)),
        }
    }
    Err(ReadError::Unreadable { attempts })
}

fn parse(bytes: &[u8], format: ScheduleFormat) -> Result<Vec<AssignmentRecord>, String> {
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader.headers().map_err(|e| e.to_string())?;
    if !headers.iter().any(|h| h == "client") {
        return Err("no `client` column".into());
    }

    reader
        .deserialize()
        .collect::<Result<Vec<AssignmentRecord>, _>>()
        .map_err(|e| e.to_string())
}

/// Read the schedule at `path` and [`validate`] it against `instance`.
///
/// A file that no format can parse fails with [`Violation::Unreadable`].
pub fn validate_file(instance: &Instance, path: &Path) -> Result<(), Violation> {
    let (records, _) = read_schedule(path).map_err(|e| Violation::Unreadable(e.to_string()))?;
    validate(instance, &records)
}
