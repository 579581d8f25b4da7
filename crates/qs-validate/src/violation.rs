//! The ways a schedule can be wrong.

use std::fmt;

use qs_core::{AssignmentRecord, CustomerId, ServerId};
use thiserror::Error;

/// A record whose value disagrees with the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub record:   AssignmentRecord,
    /// The value the instance implies.  `NaN` when the instance has no
    /// duration for the record's server.
    pub expected: f64,
}

/// A record that starts before the previous job on its server has ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub record:       AssignmentRecord,
    pub previous_end: f64,
}

/// Categories of [`Violation`], without their payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    StartBeforeArrival,
    DuplicateClient,
    TimingMismatch,
    UnknownClient,
    UnknownServer,
    ArrivalMismatch,
    DurationMismatch,
    ServerOverlap,
    Unreadable,
}

/// The first check a schedule failed, with the offending rows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("{} row(s) start before arrival:\n{}", .0.len(), Rows(.0))]
    StartBeforeArrival(Vec<AssignmentRecord>),

    /// Every row of every client that appears more than once.
    #[error("{} row(s) serve an already-served client:\n{}", .0.len(), Rows(.0))]
    DuplicateClient(Vec<AssignmentRecord>),

    #[error("{} row(s) have end != start + real_proc_time:\n{}", .0.len(), Rows(.0))]
    TimingMismatch(Vec<AssignmentRecord>),

    #[error("unknown client ids: {0:?}")]
    UnknownClient(Vec<CustomerId>),

    #[error("unknown server ids: {0:?}")]
    UnknownServer(Vec<ServerId>),

    #[error("{} row(s) record the wrong arrival:\n{}", .0.len(), Mismatches(.0))]
    ArrivalMismatch(Vec<Mismatch>),

    #[error("{} row(s) record the wrong service duration:\n{}", .0.len(), Mismatches(.0))]
    DurationMismatch(Vec<Mismatch>),

    #[error("{} server overlap(s):\n{}", .0.len(), Overlaps(.0))]
    ServerOverlap(Vec<Overlap>),

    /// The schedule file could not be parsed in any supported format.
    #[error("could not read schedule: {0}")]
    Unreadable(String),
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::StartBeforeArrival(_) => ViolationKind::StartBeforeArrival,
            Violation::DuplicateClient(_)    => ViolationKind::DuplicateClient,
            Violation::TimingMismatch(_)     => ViolationKind::TimingMismatch,
            Violation::UnknownClient(_)      => ViolationKind::UnknownClient,
            Violation::UnknownServer(_)      => ViolationKind::UnknownServer,
            Violation::ArrivalMismatch(_)    => ViolationKind::ArrivalMismatch,
            Violation::DurationMismatch(_)   => ViolationKind::DurationMismatch,
            Violation::ServerOverlap(_)      => ViolationKind::ServerOverlap,
            Violation::Unreadable(_)         => ViolationKind::Unreadable,
        }
    }
}

// ── Row formatting ────────────────────────────────────────────────────────────

fn write_record(f: &mut fmt::Formatter<'_>, r: &AssignmentRecord) -> fmt::Result {
    write!(
        f,
        "  client={} server={} arrival={} start={} real_proc_time={} end={}",
        r.client.0, r.server.0, r.arrival, r.start, r.real_proc_time, r.end
    )
}

struct Rows<'a>(&'a [AssignmentRecord]);

impl fmt::Display for Rows<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_record(f, r)?;
        }
        Ok(())
    }
}

struct Mismatches<'a>(&'a [Mismatch]);

impl fmt::Display for Mismatches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_record(f, &m.record)?;
            write!(f, " (expected {})", m.expected)?;
        }
        Ok(())
    }
}

struct Overlaps<'a>(&'a [Overlap]);

impl fmt::Display for Overlaps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, o) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "  server={} start={} end={} (previous job ends {})",
                o.record.server.0, o.record.start, o.record.end, o.previous_end
            )?;
        }
        Ok(())
    }
}
