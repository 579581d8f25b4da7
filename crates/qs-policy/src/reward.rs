//! Service reward.
//!
//! Scored once, at the moment a customer is admitted to a server:
//!
//! ```text
//! reward = appointment term      (appointment holders)
//!        | WALK_IN_BONUS         (everyone else)
//!        - 0.5 × minutes waited
//!        + RESCUE_BONUS          if 0 < minutes until abandonment < 10
//! ```
//!
//! The appointment term is piecewise in `delta = appointment − now`:
//!
//! | `delta`          | term                                   |
//! |------------------|----------------------------------------|
//! | `> 60`           | 0                                      |
//! | `(3, 60]`        | linear ramp, 0 at 60 up to MAX at 3    |
//! | `[−3, 3]`        | MAX                                    |
//! | `< −3`           | `MAX − 2 × |delta + 5|`                |
//!
//! The late branch measures lateness from a 5-minute offset, so just past the
//! on-time band (`delta` slightly below −3) the term jumps *above* its value
//! at −5 before falling.  That shape is kept as-is.

use qs_queue::Customer;

pub const MAX_APPOINTMENT_BONUS: f64 = 50.0;
pub const WALK_IN_BONUS: f64 = 20.0;
pub const WAIT_PENALTY_PER_MINUTE: f64 = 0.5;
pub const RESCUE_BONUS: f64 = 10.0;
/// Minutes-before-abandonment below which a service earns [`RESCUE_BONUS`].
pub const RESCUE_WINDOW: f64 = 10.0;

const EARLY_LIMIT: f64 = 60.0;
const ON_TIME_BAND: f64 = 3.0;
const LATE_OFFSET: f64 = 5.0;
const LATE_PENALTY_PER_MINUTE: f64 = 2.0;

/// Appointment-timeliness term for `delta = appointment_time − now`.
pub fn appointment_term(delta: f64) -> f64 {
    if delta > EARLY_LIMIT {
        0.0
    } else if delta > ON_TIME_BAND {
        let factor = 1.0 - (delta - ON_TIME_BAND) / (EARLY_LIMIT - ON_TIME_BAND);
        MAX_APPOINTMENT_BONUS * factor
    } else if delta >= -ON_TIME_BAND {
        MAX_APPOINTMENT_BONUS
    } else {
        let late_min = (delta + LATE_OFFSET).abs();
        MAX_APPOINTMENT_BONUS - LATE_PENALTY_PER_MINUTE * late_min
    }
}

/// Total reward for serving `customer` at `now`.
///
/// `appointment` is the customer's scheduled time, if it has one.
pub fn service_reward(customer: &Customer, appointment: Option<f64>, now: f64) -> f64 {
    let mut reward = match appointment {
        Some(time) => appointment_term(time - now),
        None       => WALK_IN_BONUS,
    };

    reward -= WAIT_PENALTY_PER_MINUTE * customer.wait(now);

    let left = customer.remaining_patience(now);
    if 0.0 < left && left < RESCUE_WINDOW {
        reward += RESCUE_BONUS;
    }

    reward
}
