//! The `ScheduleWriter` trait implemented by all schedule sinks.

use qs_core::AssignmentRecord;

use crate::OutputResult;

/// A sink for assignment records.
///
/// Errors are returned here but swallowed by the observer; retrieve them
/// with [`ScheduleOutputObserver::take_error`][crate::ScheduleOutputObserver::take_error].
pub trait ScheduleWriter {
    /// Append one assignment.
    fn write_record(&mut self, record: &AssignmentRecord) -> OutputResult<()>;

    /// Flush and close the underlying sink.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
