//! Read-only simulation state passed to every strategy callback.

use qs_core::ServerId;
use qs_queue::{AppointmentBook, CustomerRegistry, ServerPool};

/// A read-only snapshot of the environment at one decision point.
///
/// Built by `qs-env` each time a strategy operation runs.  The environment
/// never allows mutation of these structures while an `EnvView` is live.
pub struct EnvView<'a> {
    /// Current simulated time in minutes.
    pub now: f64,

    pub customers: &'a CustomerRegistry,

    pub servers: &'a ServerPool,

    pub appointments: &'a AppointmentBook,

    /// The server requesting a decision, if any.
    pub selected_server: Option<ServerId>,
}

impl<'a> EnvView<'a> {
    #[inline]
    pub fn new(
        now:             f64,
        customers:       &'a CustomerRegistry,
        servers:         &'a ServerPool,
        appointments:    &'a AppointmentBook,
        selected_server: Option<ServerId>,
    ) -> Self {
        Self { now, customers, servers, appointments, selected_server }
    }
}
