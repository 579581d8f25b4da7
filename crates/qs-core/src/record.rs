//! One row of a completed schedule.

use serde::{Deserialize, Serialize};

use crate::{CustomerId, ServerId};

/// The admission of one customer to one server.
///
/// Field names double as the schedule file's column headers:
/// `client,server,arrival,start,real_proc_time,end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub client:         CustomerId,
    pub server:         ServerId,
    /// The customer's arrival time, as recorded at admission.
    pub arrival:        f64,
    pub start:          f64,
    pub real_proc_time: f64,
    /// `start + real_proc_time`.
    pub end:            f64,
}

impl AssignmentRecord {
    /// Column headers in file order.
    pub const HEADERS: [&'static str; 6] =
        ["client", "server", "arrival", "start", "real_proc_time", "end"];

    /// Minutes the customer waited before service began.
    #[inline]
    pub fn wait(&self) -> f64 {
        self.start - self.arrival
    }
}
