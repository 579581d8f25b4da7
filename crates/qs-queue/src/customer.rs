//! Customers and their lifecycle.

use qs_core::{ArrivalStep, CustomerId, ServerId, TaskId};

use crate::{IdMap, QueueError, QueueResult};

/// Where a customer is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CustomerState {
    /// Arrival time not yet reached.
    Pending,
    Waiting,
    Served,
    Abandoned,
}

/// One customer, derived from an [`ArrivalStep`].
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id:                 CustomerId,
    pub arrival_time:       f64,
    pub task:               TaskId,
    /// Real service duration on each server, indexed by `ServerId`.
    pub real_service_times: Vec<f64>,
    pub abandonment_time:   f64,
    pub state:              CustomerState,
}

impl Customer {
    pub fn from_step(step: &ArrivalStep) -> Self {
        Self {
            id:                 step.client,
            arrival_time:       step.arrival_time,
            task:               step.task,
            real_service_times: step.real_service_times.clone(),
            abandonment_time:   step.abandonment_time,
            state:              CustomerState::Pending,
        }
    }

    #[inline]
    pub fn real_service_time(&self, server: ServerId) -> Option<f64> {
        self.real_service_times.get(server.index()).copied()
    }

    /// Minutes spent waiting as of `now`.
    #[inline]
    pub fn wait(&self, now: f64) -> f64 {
        now - self.arrival_time
    }

    /// Minutes left before the customer abandons (negative once past).
    #[inline]
    pub fn remaining_patience(&self, now: f64) -> f64 {
        self.abandonment_time - now
    }

    #[inline]
    pub fn has_expired(&self, now: f64) -> bool {
        now >= self.abandonment_time
    }
}

/// Exact mapping from customer id to [`Customer`], plus the waiting set.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: IdMap<CustomerId, Customer>,
    /// Ids currently in `Waiting`, in admission order.
    waiting:   Vec<CustomerId>,
    pending:   usize,
    served:    usize,
    abandoned: usize,
}

impl CustomerRegistry {
    /// Build one `Pending` customer per timeline step.
    pub fn from_timeline(timeline: &[ArrivalStep]) -> QueueResult<Self> {
        let mut customers: IdMap<CustomerId, Customer> = IdMap::default();
        customers.reserve(timeline.len());
        for step in timeline {
            if customers.insert(step.client, Customer::from_step(step)).is_some() {
                return Err(QueueError::DuplicateCustomer(step.client));
            }
        }
        Ok(Self {
            pending: customers.len(),
            customers,
            ..Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    /// All customers, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// `Pending → Waiting`.
    pub fn arrive(&mut self, id: CustomerId) -> QueueResult<()> {
        self.transition(id, CustomerState::Pending, CustomerState::Waiting)?;
        self.pending -= 1;
        self.waiting.push(id);
        Ok(())
    }

    /// `Waiting → Served`; returns the served customer.
    pub fn serve(&mut self, id: CustomerId) -> QueueResult<&Customer> {
        self.transition(id, CustomerState::Waiting, CustomerState::Served)?;
        self.waiting.retain(|&w| w != id);
        self.served += 1;
        self.customers.get(&id).ok_or(QueueError::UnknownCustomer(id))
    }

    /// Move every waiting customer whose deadline has passed to `Abandoned`.
    ///
    /// Returns the abandoned ids in ascending order.
    pub fn abandon_expired(&mut self, now: f64) -> Vec<CustomerId> {
        let customers = &mut self.customers;
        let mut gone = Vec::new();
        self.waiting.retain(|id| match customers.get_mut(id) {
            Some(c) if c.has_expired(now) => {
                c.state = CustomerState::Abandoned;
                gone.push(*id);
                false
            }
            _ => true,
        });
        self.abandoned += gone.len();
        gone.sort_unstable();
        gone
    }

    /// Waiting customers sorted by arrival time, ties broken by id.
    ///
    /// Longest-waiting first, since every waiting customer shares `now`.
    pub fn waiting_by_arrival(&self) -> Vec<&Customer> {
        let mut list: Vec<&Customer> = self
            .waiting
            .iter()
            .filter_map(|id| self.customers.get(id))
            .collect();
        list.sort_by(|a, b| {
            a.arrival_time
                .total_cmp(&b.arrival_time)
                .then(a.id.cmp(&b.id))
        });
        list
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending
    }

    pub fn served_count(&self) -> usize {
        self.served
    }

    pub fn abandoned_count(&self) -> usize {
        self.abandoned
    }

    fn transition(
        &mut self,
        id:   CustomerId,
        from: CustomerState,
        to:   CustomerState,
    ) -> QueueResult<()> {
        let customer = self
            .customers
            .get_mut(&id)
            .ok_or(QueueError::UnknownCustomer(id))?;
        if customer.state != from {
            return Err(QueueError::InvalidTransition { client: id, from: customer.state, to });
        }
        customer.state = to;
        Ok(())
    }
}
