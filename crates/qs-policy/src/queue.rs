//! `QueueStrategy`: the standard decision strategy.
//!
//! # Queue view
//!
//! Up to `K` waiting customers are visible, ordered by arrival time (ties by
//! id).  Since every waiting customer is measured against the same `now`,
//! arrival order is also longest-wait-first, so the observation rows and the
//! action indices line up: action `i` selects the customer in row `i`.
//!
//! # Mask
//!
//! A visible customer is *urgent* when it has an appointment and
//! `now >= appointment − 1`.  If any visible customer is urgent, only the
//! urgent positions (plus HOLD) are legal; otherwise every visible position
//! is.

use qs_queue::Customer;

use crate::observation::{ARRIVAL_SCALE, DURATION_SCALE, PADDING_ROW};
use crate::{
    Action, ActionMask, DecisionStrategy, EnvView, Observation, Resolution, reward,
};

/// Default queue view capacity `K`.
pub const DEFAULT_QUEUE_CAPACITY: usize = 500;

/// Minutes before an appointment at which its holder becomes urgent.
pub const URGENCY_WINDOW: f64 = 1.0;

/// The standard strategy, parameterised by the visible queue capacity `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStrategy {
    capacity: usize,
}

impl Default for QueueStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl QueueStrategy {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// `K`; HOLD is `Action(K)`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The first `K` waiting customers in arrival order.
    pub fn visible<'a>(&self, view: &EnvView<'a>) -> Vec<&'a Customer> {
        let mut list = view.customers.waiting_by_arrival();
        list.truncate(self.capacity);
        list
    }

    /// `true` if `customer` holds an appointment that is due within the
    /// urgency window (or already past).
    pub fn is_urgent(&self, view: &EnvView<'_>, customer: &Customer) -> bool {
        view.appointments
            .time_for(customer.id)
            .is_some_and(|appt| view.now >= appt - URGENCY_WINDOW)
    }
}

impl DecisionStrategy for QueueStrategy {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn build_observation(&self, view: &EnvView<'_>) -> Observation {
        let mut queue = vec![PADDING_ROW; self.capacity];
        for (row, customer) in queue.iter_mut().zip(self.visible(view)) {
            let has_appointment = if view.appointments.has(customer.id) { 1.0 } else { 0.0 };
            let avg = view.servers.mean_avg_duration(customer.task);
            *row = [
                (customer.arrival_time / ARRIVAL_SCALE) as f32,
                (avg / DURATION_SCALE) as f32,
                has_appointment,
                customer.remaining_patience(view.now) as f32,
            ];
        }

        let servers = view
            .servers
            .iter()
            .map(|s| {
                let selected = if Some(s.id) == view.selected_server { 1.0 } else { 0.0 };
                [s.expected_end as f32, selected]
            })
            .collect();

        Observation {
            queue,
            servers,
            context: [view.now as f32, view.customers.waiting_count() as f32],
        }
    }

    fn resolve_action(&self, view: &EnvView<'_>, action: Action) -> Resolution {
        if action.is_hold(self.capacity) {
            return Resolution::Hold;
        }
        if !self.compute_mask(view).is_legal(action) {
            return Resolution::Invalid;
        }
        match self.visible(view).get(action.index()) {
            Some(customer) => Resolution::Assign(customer.id),
            None           => Resolution::Invalid,
        }
    }

    fn compute_reward(&self, view: &EnvView<'_>, customer: &Customer) -> f64 {
        reward::service_reward(customer, view.appointments.time_for(customer.id), view.now)
    }

    fn compute_mask(&self, view: &EnvView<'_>) -> ActionMask {
        let visible = self.visible(view);
        let mut mask = ActionMask::hold_only(self.capacity);

        let urgent: Vec<usize> = visible
            .iter()
            .enumerate()
            .filter(|(_, c)| self.is_urgent(view, c))
            .map(|(i, _)| i)
            .collect();

        if urgent.is_empty() {
            (0..visible.len()).for_each(|i| mask.allow(i));
        } else {
            urgent.into_iter().for_each(|i| mask.allow(i));
        }
        mask
    }
}
