//! Random scenario generation for training episodes.
//!
//! Training runs want a fresh instance every episode; evaluation runs use a
//! fixed one.  `ScenarioGenerator` draws instances that satisfy
//! [`Instance::check`] by construction.

use serde::{Deserialize, Serialize};

use crate::{
    Appointment, ArrivalStep, CustomerId, Instance, QsError, QsResult, SimRng, TaskId,
};

/// Parameters for drawing random instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioGenerator {
    pub servers:           usize,
    pub tasks:             usize,
    pub customers:         usize,
    /// Arrivals are uniform over `[0, horizon)` minutes.
    pub horizon:           f64,
    /// Average service duration per (server, task), drawn uniformly.
    pub mean_service:      (f64, f64),
    /// Minutes between arrival and abandonment, drawn uniformly.
    pub patience:          (f64, f64),
    /// Probability that a customer holds an appointment.
    pub appointment_share: f64,
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self {
            servers:           3,
            tasks:             4,
            customers:         120,
            horizon:           480.0,
            mean_service:      (5.0, 25.0),
            patience:          (20.0, 90.0),
            appointment_share: 0.2,
        }
    }
}

impl ScenarioGenerator {
    fn check(&self) -> QsResult<()> {
        if self.servers == 0 || self.tasks == 0 {
            return Err(QsError::Config("generator needs at least one server and one task".into()));
        }
        if self.tasks > u16::MAX as usize {
            return Err(QsError::Config(format!("too many task types: {}", self.tasks)));
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(QsError::Config(format!("horizon must be positive, got {}", self.horizon)));
        }
        for (name, (lo, hi)) in [("mean_service", self.mean_service), ("patience", self.patience)] {
            if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
                return Err(QsError::Config(format!("{name} range ({lo}, {hi}) is invalid")));
            }
        }
        if !(0.0..=1.0).contains(&self.appointment_share) {
            return Err(QsError::Config(format!(
                "appointment_share must be in [0, 1], got {}",
                self.appointment_share
            )));
        }
        Ok(())
    }

    /// Draw one instance.
    pub fn generate(&self, rng: &mut SimRng) -> QsResult<Instance> {
        self.check()?;

        let average_matrix: Vec<Vec<f64>> = (0..self.servers)
            .map(|_| {
                (0..self.tasks)
                    .map(|_| rng.gen_range(self.mean_service.0..=self.mean_service.1))
                    .collect()
            })
            .collect();

        let mut arrivals: Vec<f64> = (0..self.customers)
            .map(|_| rng.gen_range(0.0..self.horizon))
            .collect();
        arrivals.sort_by(f64::total_cmp);

        let mut timeline = Vec::with_capacity(self.customers);
        let mut appointments = Vec::new();
        for (i, arrival_time) in arrivals.into_iter().enumerate() {
            let client = CustomerId(i as u32);
            let task = rng.gen_range(0..self.tasks);
            let real_service_times = average_matrix
                .iter()
                .map(|row| row[task] * rng.gen_range(0.8..=1.2))
                .collect();
            let patience = rng.gen_range(self.patience.0..=self.patience.1);

            timeline.push(ArrivalStep {
                client,
                arrival_time,
                task: TaskId(task as u16),
                abandonment_time: arrival_time + patience,
                real_service_times,
            });

            if rng.gen_bool(self.appointment_share) {
                let time = (arrival_time + rng.gen_range(-15.0..=30.0)).max(0.0);
                appointments.push(Appointment { client, time });
            }
        }

        Ok(Instance { timeline, average_matrix, appointments, unavailability: Vec::new() })
    }
}
