//! Appointment lookup.

use qs_core::{Appointment, CustomerId};

use crate::IdMap;

/// Scheduled appointment times keyed by customer.
///
/// Built once per episode from the instance; at most one appointment per
/// customer (a later duplicate would overwrite, but `Instance::check`
/// rejects duplicates first).
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    by_client: IdMap<CustomerId, f64>,
}

impl AppointmentBook {
    pub fn new(appointments: &[Appointment]) -> Self {
        Self {
            by_client: appointments.iter().map(|a| (a.client, a.time)).collect(),
        }
    }

    /// The scheduled time for `client`, if it has an appointment.
    #[inline]
    pub fn time_for(&self, client: CustomerId) -> Option<f64> {
        self.by_client.get(&client).copied()
    }

    #[inline]
    pub fn has(&self, client: CustomerId) -> bool {
        self.by_client.contains_key(&client)
    }

    pub fn len(&self) -> usize {
        self.by_client.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_client.is_empty()
    }
}
