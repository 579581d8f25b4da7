//! Simulated time.
//!
//! Time is measured in minutes from the start of the scenario and carried as
//! `f64`: arrivals and service durations in real instances are fractional.
//! All comparisons that decide validity go through [`approx_eq`] with the
//! fixed tolerance [`EPSILON`].
//!
//! `SimTime` exists only so times can key ordered collections (the event
//! queue); plain `f64` is used everywhere else.

use std::cmp::Ordering;
use std::fmt;

/// Absolute tolerance for every floating-point time comparison.
pub const EPSILON: f64 = 1e-4;

/// Minutes in one simulated day.  Arrivals are normalised by this.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// `|a - b| <= EPSILON`.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// A totally ordered point in simulated time (minutes).
///
/// Ordering uses [`f64::total_cmp`], so `SimTime` is usable as a `BTreeMap`
/// key.  NaN never appears in valid instances; if it does it sorts last.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for SimTime {
    fn from(minutes: f64) -> Self {
        SimTime(minutes)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0);
        let day = (total / MINUTES_PER_DAY).floor() as u64;
        let in_day = total - day as f64 * MINUTES_PER_DAY;
        let hours = (in_day / 60.0).floor() as u32;
        let minutes = in_day - hours as f64 * 60.0;
        write!(f, "t={:.2} (day {} {:02}:{:05.2})", self.0, day, hours, minutes)
    }
}
