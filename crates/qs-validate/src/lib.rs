//! `qs-validate`: independent checking of completed schedules.
//!
//! [`validate`] re-derives every customer's arrival and real service
//! durations from the [`Instance`][qs_core::Instance] alone and checks a
//! schedule against them.  Checks run in a fixed order and stop at the first
//! failure:
//!
//! | # | Check                                         | Violation            |
//! |---|-----------------------------------------------|----------------------|
//! | 1 | `start >= arrival`                            | `StartBeforeArrival` |
//! | 2 | each client served at most once               | `DuplicateClient`    |
//! | 3 | `end == start + real_proc_time`               | `TimingMismatch`     |
//! | 4 | client and server ids exist                   | `UnknownClient` / `UnknownServer` |
//! | 5 | recorded arrival matches the instance         | `ArrivalMismatch`    |
//! | 6 | recorded duration matches the instance        | `DurationMismatch`   |
//! | 7 | no two jobs overlap on a server               | `ServerOverlap`      |
//!
//! All comparisons use the absolute tolerance [`EPSILON`][qs_core::EPSILON].
//!
//! [`read_schedule`] loads a schedule file, accepting either `;` or `,` as
//! the delimiter; [`validate_file`] combines the two.

pub mod error;
pub mod reader;
pub mod validate;
pub mod violation;


pub use error::{ReadError, ReadResult};
pub use reader::{ScheduleFormat, read_schedule, read_schedule_bytes, validate_file};
pub use validate::validate;
pub use violation::{Mismatch, Overlap, Violation, ViolationKind};
