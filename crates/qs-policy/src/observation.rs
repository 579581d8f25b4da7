//! The fixed-shape observation handed to a policy.

/// Features per queue row: arrival, mean duration, has-appointment, patience.
pub const QUEUE_FEATURES: usize = 4;

/// Features per server row: expected free time, is-selected flag.
pub const SERVER_FEATURES: usize = 2;

/// Row used for unused queue slots.
pub const PADDING_ROW: [f32; QUEUE_FEATURES] = [-1.0; QUEUE_FEATURES];

/// Arrival times are divided by this (minutes per day).
pub const ARRIVAL_SCALE: f64 = qs_core::MINUTES_PER_DAY;

/// Average service durations are divided by this (minutes per hour).
pub const DURATION_SCALE: f64 = 60.0;

/// What a policy sees at a decision point.
///
/// Shapes are fixed for a given environment: `queue` always has `K` rows and
/// `servers` one row per server, so a learned model can take the flattened
/// form directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// `K` rows, longest-waiting first, padded with [`PADDING_ROW`].
    ///
    /// Row layout: `[arrival / 1440, mean avg duration / 60,
    /// has_appointment (0|1), minutes until abandonment]`.
    pub queue: Vec<[f32; QUEUE_FEATURES]>,

    /// One row per server: `[expected free time, 1 if selected else 0]`.
    pub servers: Vec<[f32; SERVER_FEATURES]>,

    /// `[current time, waiting customer count]`.
    pub context: [f32; 2],
}

impl Observation {
    /// Number of queue rows that hold a real customer.
    pub fn visible_customers(&self) -> usize {
        self.queue.iter().take_while(|row| **row != PADDING_ROW).count()
    }

    /// Concatenate queue, server, and context features row-major.
    pub fn flatten(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(
            self.queue.len() * QUEUE_FEATURES + self.servers.len() * SERVER_FEATURES + 2,
        );
        for row in &self.queue {
            out.extend_from_slice(row);
        }
        for row in &self.servers {
            out.extend_from_slice(row);
        }
        out.extend_from_slice(&self.context);
        out
    }
}
