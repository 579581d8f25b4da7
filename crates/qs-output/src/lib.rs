//! `qs-output`: schedule writers for the queue_sim framework.
//!
//! | Writer                | File                                                   |
//! |-----------------------|--------------------------------------------------------|
//! | [`CsvScheduleWriter`] | one row per assignment, header `client,server,arrival,start,real_proc_time,end` |
//!
//! Writers implement [`ScheduleWriter`] and are driven by
//! [`ScheduleOutputObserver`], which implements `qs_env::EpisodeObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use qs_output::{CsvScheduleWriter, ScheduleOutputObserver};
//!
//! let writer = CsvScheduleWriter::new(Path::new("result_0_0.csv"))?;
//! let mut obs = ScheduleOutputObserver::new(writer);
//! env.run_episode(&mut policy, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;


pub use csv::CsvScheduleWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ScheduleOutputObserver;
pub use writer::ScheduleWriter;
