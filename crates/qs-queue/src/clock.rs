//! `EventEngine`: the simulation clock and its pending-event queue.
//!
//! # Why this exists
//!
//! Nothing happens between events: customers only arrive, abandon, or get a
//! free server at discrete instants.  Rather than stepping a fixed tick, the
//! engine jumps straight to the earliest pending event time and hands back
//! every event scheduled for that instant.
//!
//! `pop_next` is the only way time moves, and it never moves backwards.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log E) insert and pop where E is the number of distinct
//! pending event times, at most a few per customer.

use std::collections::BTreeMap;

use qs_core::{CustomerId, ServerId, SimTime};

/// Something that can change whether a decision is possible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A customer's arrival time has been reached.
    Arrival(CustomerId),
    /// A server's in-flight job completes.
    ServerFree(ServerId),
    /// A customer's abandonment deadline has been reached.  Stale if the
    /// customer was already served.
    Abandonment(CustomerId),
    /// A server's unavailability window closes.
    WindowEnd(ServerId),
}

/// Pending events keyed by time, plus the current time.
#[derive(Default)]
pub struct EventEngine {
    now:   SimTime,
    inner: BTreeMap<SimTime, Vec<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time in minutes.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now.minutes()
    }

    /// Schedule `event` at `at` minutes.
    ///
    /// Times before `now` are clamped to `now` so the event still fires on
    /// the next `pop_next`.
    pub fn schedule(&mut self, at: f64, event: Event) {
        let at = SimTime(at).max(self.now);
        self.inner.entry(at).or_default().push(event);
        self.total += 1;
    }

    /// Advance to the earliest pending time and return all events due then.
    ///
    /// Returns `None` (and leaves time unchanged) if nothing is pending.
    pub fn pop_next(&mut self) -> Option<(f64, Vec<Event>)> {
        let (at, events) = self.inner.pop_first()?;
        self.total -= events.len();
        self.now = at;
        Some((at.minutes(), events))
    }

    /// The earliest pending event time, or `None` if empty.
    pub fn next_time(&self) -> Option<f64> {
        self.inner.keys().next().map(|t| t.minutes())
    }

    /// Total number of pending events.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop all pending events and rewind to time zero.  Used on episode reset.
    pub fn reset(&mut self) {
        self.inner.clear();
        self.total = 0;
        self.now = SimTime::ZERO;
    }
}
