//! Servers and the pool that owns them.

use qs_core::{Instance, ServerId, TaskId};

use crate::{Customer, QueueError, QueueResult};

/// One server's service profile and occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub id:                ServerId,
    /// Average service duration per task type, indexed by `TaskId`.
    pub avg_service_times: Vec<f64>,
    /// Absolute time the in-flight job finishes.  `<= now` when idle.
    pub busy_until:        f64,
    /// `start + average duration` of the in-flight job, what a planner
    /// expects, as opposed to `busy_until` which is what actually happens.
    pub expected_end:      f64,
    /// Unavailability windows `[start, end)`, sorted by start.
    windows:               Vec<(f64, f64)>,
}

impl Server {
    pub fn new(id: ServerId, avg_service_times: Vec<f64>) -> Self {
        Self {
            id,
            avg_service_times,
            busy_until:   0.0,
            expected_end: 0.0,
            windows:      Vec::new(),
        }
    }

    #[inline]
    pub fn is_idle(&self, now: f64) -> bool {
        self.busy_until <= now
    }

    /// End of the unavailability window covering `now`, if any.
    pub fn window_end_at(&self, now: f64) -> Option<f64> {
        self.windows
            .iter()
            .find(|&&(start, end)| start <= now && now < end)
            .map(|&(_, end)| end)
    }

    /// Idle and outside every unavailability window.
    #[inline]
    pub fn is_available(&self, now: f64) -> bool {
        self.is_idle(now) && self.window_end_at(now).is_none()
    }

    pub fn windows(&self) -> &[(f64, f64)] {
        &self.windows
    }

    #[inline]
    pub fn avg_service_time(&self, task: TaskId) -> Option<f64> {
        self.avg_service_times.get(task.index()).copied()
    }
}

/// The outcome of [`ServerPool::assign`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub server:         ServerId,
    pub start:          f64,
    pub real_proc_time: f64,
    pub end:            f64,
}

/// All servers of one episode, indexed by `ServerId`.
#[derive(Debug, Clone, Default)]
pub struct ServerPool {
    servers: Vec<Server>,
}

impl ServerPool {
    /// One idle server per row of the average matrix, with the instance's
    /// unavailability windows attached.
    pub fn from_instance(instance: &Instance) -> Self {
        let mut servers: Vec<Server> = instance
            .average_matrix
            .iter()
            .enumerate()
            .map(|(i, row)| Server::new(ServerId(i as u32), row.clone()))
            .collect();

        for w in &instance.unavailability {
            if let Some(server) = servers.get_mut(w.server.index()) {
                server.windows.push((w.start, w.end));
            }
        }
        for server in &mut servers {
            server.windows.sort_by(|a, b| a.0.total_cmp(&b.0));
        }

        Self { servers }
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn get(&self, id: ServerId) -> Option<&Server> {
        self.servers.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter()
    }

    /// Lowest-id server that can take work at `now`.
    pub fn first_available(&self, now: f64) -> Option<ServerId> {
        self.servers
            .iter()
            .find(|s| s.is_available(now))
            .map(|s| s.id)
    }

    /// `true` while any server is still finishing a job.
    pub fn any_busy(&self, now: f64) -> bool {
        self.servers.iter().any(|s| !s.is_idle(now))
    }

    /// Average duration of `task` on `server`.
    pub fn avg_duration(&self, server: ServerId, task: TaskId) -> Option<f64> {
        self.get(server)?.avg_service_time(task)
    }

    /// Average duration of `task`, averaged again across all servers.
    pub fn mean_avg_duration(&self, task: TaskId) -> f64 {
        let (sum, n) = self
            .servers
            .iter()
            .filter_map(|s| s.avg_service_time(task))
            .fold((0.0, 0usize), |(sum, n), d| (sum + d, n + 1));
        if n == 0 { 0.0 } else { sum / n as f64 }
    }

    /// Start `customer` on `server` at `start`.
    ///
    /// Sets `busy_until = start + real duration` and returns the assignment.
    /// The server must be available at `start`.
    pub fn assign(
        &mut self,
        server:   ServerId,
        customer: &Customer,
        start:    f64,
    ) -> QueueResult<Assignment> {
        let slot = self
            .servers
            .get_mut(server.index())
            .ok_or(QueueError::UnknownServer(server))?;
        if !slot.is_available(start) {
            return Err(QueueError::ServerUnavailable { server, at: start });
        }

        let real_proc_time = customer
            .real_service_time(server)
            .ok_or(QueueError::MissingServiceTime { client: customer.id, server })?;
        let expected = slot.avg_service_time(customer.task).unwrap_or(real_proc_time);

        let end = start + real_proc_time;
        slot.busy_until = end;
        slot.expected_end = start + expected;

        Ok(Assignment { server, start, real_proc_time, end })
    }
}
