//! The read-only scenario description consumed by every other crate.
//!
//! An [`Instance`] bundles the four inputs of one scenario:
//!
//! | Field            | Shape                                                |
//! |------------------|------------------------------------------------------|
//! | `timeline`       | one [`ArrivalStep`] per customer                     |
//! | `average_matrix` | `servers × tasks` average service durations          |
//! | `appointments`   | at most one [`Appointment`] per customer             |
//! | `unavailability` | [`Unavailability`] windows, any number per server    |
//!
//! Real service durations are per customer (`ArrivalStep::real_service_times`,
//! indexed by server) so that two customers with the same task can take
//! different times on the same server.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CustomerId, QsError, QsResult, ServerId, TaskId};

/// One customer's entry in the arrival timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalStep {
    pub client:             CustomerId,
    /// Minutes from scenario start.
    pub arrival_time:       f64,
    pub task:               TaskId,
    /// Absolute time after which the customer leaves unserved.
    pub abandonment_time:   f64,
    /// Real service duration on each server, indexed by `ServerId`.
    pub real_service_times: Vec<f64>,
}

/// A scheduled appointment for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub client: CustomerId,
    pub time:   f64,
}

/// A half-open window `[start, end)` during which `server` takes no new work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unavailability {
    pub server: ServerId,
    pub start:  f64,
    pub end:    f64,
}

impl Unavailability {
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

/// Immutable input describing one simulation scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub timeline:       Vec<ArrivalStep>,
    /// Expected service duration, indexed `average_matrix[server][task]`.
    pub average_matrix: Vec<Vec<f64>>,
    #[serde(default)]
    pub appointments:   Vec<Appointment>,
    #[serde(default)]
    pub unavailability: Vec<Unavailability>,
}

impl Instance {
    pub fn server_count(&self) -> usize {
        self.average_matrix.len()
    }

    /// Number of task types (columns of the average matrix).
    pub fn task_count(&self) -> usize {
        self.average_matrix.first().map_or(0, Vec::len)
    }

    pub fn server_ids(&self) -> impl Iterator<Item = ServerId> + '_ {
        (0..self.server_count() as u32).map(ServerId)
    }

    /// Check the structural consistency of the instance.
    ///
    /// Returns the first problem found.  The simulation and the validator both
    /// assume a checked instance.
    pub fn check(&self) -> QsResult<()> {
        let servers = self.server_count();
        if servers == 0 {
            return Err(QsError::NoServers);
        }

        let tasks = self.task_count();
        for (i, row) in self.average_matrix.iter().enumerate() {
            let server = ServerId(i as u32);
            if row.len() != tasks {
                return Err(QsError::RaggedMatrix {
                    server,
                    expected: tasks,
                    got:      row.len(),
                });
            }
            for &avg in row {
                check_duration(server, "average_matrix", avg)?;
            }
        }

        let mut clients = HashSet::with_capacity(self.timeline.len());
        for step in &self.timeline {
            if !clients.insert(step.client) {
                return Err(QsError::DuplicateCustomer(step.client));
            }
            if step.task.index() >= tasks {
                return Err(QsError::UnknownTask { client: step.client, task: step.task });
            }
            if step.real_service_times.len() != servers {
                return Err(QsError::ServiceVectorMismatch {
                    client:   step.client,
                    expected: servers,
                    got:      step.real_service_times.len(),
                });
            }
            check_time(step.client, "arrival_time", step.arrival_time)?;
            check_time(step.client, "abandonment_time", step.abandonment_time)?;
            for &real in &step.real_service_times {
                check_duration(step.client, "real_service_times", real)?;
            }
        }

        let mut booked = HashSet::with_capacity(self.appointments.len());
        for appt in &self.appointments {
            if !clients.contains(&appt.client) {
                return Err(QsError::UnknownCustomer(appt.client));
            }
            if !booked.insert(appt.client) {
                return Err(QsError::DuplicateAppointment(appt.client));
            }
            check_time(appt.client, "appointment time", appt.time)?;
        }

        for window in &self.unavailability {
            if window.server.index() >= servers {
                return Err(QsError::UnknownServer(window.server));
            }
            check_time(window.server, "window start", window.start)?;
            check_time(window.server, "window end", window.end)?;
            if window.end < window.start {
                return Err(QsError::InvertedWindow {
                    server: window.server,
                    start:  window.start,
                    end:    window.end,
                });
            }
        }

        Ok(())
    }
}

// Times may be negative (the clock clamps them to its start) but must order.
fn check_time(owner: impl fmt::Display, field: &'static str, value: f64) -> QsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(QsError::NonFiniteTime { owner: owner.to_string(), field, value })
    }
}

fn check_duration(owner: impl fmt::Display, field: &'static str, value: f64) -> QsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(QsError::InvalidDuration { owner: owner.to_string(), field, value })
    }
}
