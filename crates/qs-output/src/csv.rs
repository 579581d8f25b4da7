//! CSV schedule writer.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use qs_core::AssignmentRecord;

use crate::OutputResult;
use crate::writer::ScheduleWriter;

/// Writes a schedule to a single delimited file.
pub struct CsvScheduleWriter {
    out:      Writer<File>,
    path:     PathBuf,
    rows:     usize,
    finished: bool,
}

impl CsvScheduleWriter {
    /// Create (or truncate) a comma-delimited file at `path` and write the
    /// header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        Self::with_delimiter(path, b',')
    }

    /// As [`new`][Self::new], with a custom field delimiter.
    pub fn with_delimiter(path: &Path, delimiter: u8) -> OutputResult<Self> {
        let mut out = WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_path(path)?;
        out.write_record(AssignmentRecord::HEADERS)?;

        Ok(Self {
            out,
            path:     path.to_path_buf(),
            rows:     0,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl ScheduleWriter for CsvScheduleWriter {
    fn write_record(&mut self, record: &AssignmentRecord) -> OutputResult<()> {
        self.out.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
