//! `ScheduleOutputObserver<W>`: bridges `EpisodeObserver` to a `ScheduleWriter`.

use qs_core::AssignmentRecord;
use qs_env::{EpisodeObserver, EpisodeSummary};

use crate::writer::ScheduleWriter;
use crate::{OutputError, OutputResult};

/// An [`EpisodeObserver`] that streams each assignment to a
/// [`ScheduleWriter`] as it is made.
///
/// Errors from the writer are stored internally because `EpisodeObserver`
/// methods have no return value.  After `run_episode` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct ScheduleOutputObserver<W: ScheduleWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: ScheduleWriter> ScheduleOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the episode.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect the file after the episode).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ScheduleWriter> EpisodeObserver for ScheduleOutputObserver<W> {
    fn on_assignment(&mut self, record: &AssignmentRecord) {
        let result = self.writer.write_record(record);
        self.store_err(result);
    }

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
