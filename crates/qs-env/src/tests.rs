//! Integration tests for qs-env.

use qs_core::{
    Appointment, ArrivalStep, CustomerId, Instance, QsError, ScenarioGenerator, ServerId, TaskId,
    Unavailability,
};
use qs_policy::{Action, ActionMask, FirstLegalPolicy, HoldPolicy, Observation, QueueStrategy};

use crate::{
    DecisionEnv, EnvBuilder, EnvConfig, EnvError, EnvState, EpisodeObserver, EpisodeSummary, Mode,
    NoopObserver, StepKind,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const K: usize = 4;

fn test_config() -> EnvConfig {
    EnvConfig { queue_capacity: K, ..EnvConfig::default() }
}

fn step(id: u32, arrival: f64, patience: f64, services: Vec<f64>) -> ArrivalStep {
    ArrivalStep {
        client:             CustomerId(id),
        arrival_time:       arrival,
        task:               TaskId(0),
        abandonment_time:   arrival + patience,
        real_service_times: services,
    }
}

fn instance(timeline: Vec<ArrivalStep>, servers: usize) -> Instance {
    Instance {
        timeline,
        average_matrix: vec![vec![10.0]; servers],
        appointments:   vec![],
        unavailability: vec![],
    }
}

/// One customer (arrival 0, deadline 30, 10 minutes on server 0), one server.
fn single_customer() -> Instance {
    instance(vec![step(0, 0.0, 30.0, vec![10.0])], 1)
}

fn build(inst: Instance) -> DecisionEnv<qs_policy::QueueStrategy> {
    EnvBuilder::new(test_config()).instance(inst).build().unwrap()
}

// ── EnvBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_at_first_decision_point() {
        let env = build(single_customer());
        assert_eq!(env.state(), EnvState::Running);
        assert_eq!(env.now(), 0.0);
        assert_eq!(env.selected_server(), Some(ServerId(0)));
        assert_eq!(env.customers().waiting_count(), 1);
    }

    #[test]
    fn zero_capacity_errors() {
        let config = EnvConfig { queue_capacity: 0, ..EnvConfig::default() };
        let result = EnvBuilder::new(config).instance(single_customer()).build();
        assert!(matches!(result, Err(EnvError::Config(_))));
    }

    #[test]
    fn test_mode_requires_instance() {
        let result = EnvBuilder::new(test_config()).build();
        assert!(matches!(result, Err(EnvError::Config(_))));
    }

    #[test]
    fn test_mode_rejects_generator() {
        let result = EnvBuilder::new(test_config())
            .instance(single_customer())
            .generator(ScenarioGenerator::default())
            .build();
        assert!(matches!(result, Err(EnvError::Config(_))));
    }

    #[test]
    fn train_mode_requires_a_scenario() {
        let config = EnvConfig { mode: Mode::Train, ..test_config() };
        assert!(EnvBuilder::new(config.clone()).build().is_err());
        assert!(EnvBuilder::new(config).instance(single_customer()).build().is_ok());
    }

    #[test]
    fn malformed_instance_errors() {
        let mut inst = single_customer();
        inst.timeline[0].real_service_times.clear();
        let result = EnvBuilder::new(test_config()).instance(inst).build();
        assert!(matches!(result, Err(EnvError::Instance(_))));
    }

    #[test]
    fn nan_deadline_rejected_at_build() {
        let mut inst = single_customer();
        inst.timeline[0].abandonment_time = f64::NAN;
        let result = EnvBuilder::new(test_config()).instance(inst).build();
        assert!(matches!(result, Err(EnvError::Instance(QsError::NonFiniteTime { .. }))));
    }

    #[test]
    fn strategy_capacity_must_match_config() {
        let result = EnvBuilder::new(test_config())
            .strategy(QueueStrategy::new(K + 1))
            .instance(single_customer())
            .build();
        assert!(matches!(result, Err(EnvError::Config(_))));

        let env = EnvBuilder::new(test_config())
            .strategy(QueueStrategy::new(K))
            .instance(single_customer())
            .build();
        assert!(env.is_ok());
    }

    #[test]
    fn empty_instance_terminates_immediately() {
        let env = build(instance(vec![], 2));
        assert_eq!(env.state(), EnvState::Terminated);
        assert_eq!(env.action_mask().legal_actions().collect::<Vec<_>>(), vec![Action(K)]);
    }

    #[test]
    fn config_from_partial_json() {
        let config: EnvConfig = serde_json::from_str(r#"{"mode": "train", "seed": 9}"#).unwrap();
        assert_eq!(config.mode, Mode::Train);
        assert_eq!(config.seed, 9);
        assert_eq!(config.queue_capacity, 500);
        assert_eq!(config.invalid_action_penalty, -100.0);
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn single_customer_served_immediately() {
        let mut env = build(single_customer());
        let result = env.step(Action(0)).unwrap();

        let StepKind::Assigned(record) = result.kind else {
            panic!("expected assignment, got {:?}", result.kind);
        };
        assert_eq!(record.client, CustomerId(0));
        assert_eq!(record.server, ServerId(0));
        assert_eq!((record.arrival, record.start), (0.0, 0.0));
        assert_eq!((record.real_proc_time, record.end), (10.0, 10.0));
        assert_eq!(result.reward, 20.0);
        assert!(result.terminated);
        assert_eq!(result.now, 10.0);
        assert_eq!(env.schedule(), &[record]);
    }

    #[test]
    fn step_after_termination_errors() {
        let mut env = build(single_customer());
        env.step(Action(0)).unwrap();
        assert!(matches!(env.step(Action(0)), Err(EnvError::Terminated)));
    }

    #[test]
    fn hold_advances_to_next_event() {
        let mut env = build(instance(
            vec![step(0, 0.0, 60.0, vec![10.0]), step(1, 5.0, 60.0, vec![10.0])],
            1,
        ));
        let result = env.step(Action(K)).unwrap();
        assert_eq!(result.kind, StepKind::Held);
        assert_eq!(result.reward, 0.0);
        assert_eq!(env.now(), 5.0);
        assert_eq!(env.customers().waiting_count(), 2);
        assert!(env.schedule().is_empty());
    }

    #[test]
    fn invalid_action_penalised_without_side_effects() {
        let mut env = build(single_customer());
        let before = env.observe();
        let result = env.step(Action(2)).unwrap();
        assert_eq!(result.kind, StepKind::Invalid);
        assert_eq!(result.reward, -100.0);
        assert_eq!(env.now(), 0.0);
        assert_eq!(env.observe(), before);
        assert!(env.schedule().is_empty());
        assert_eq!(env.summary().invalid_actions, 1);
    }

    #[test]
    fn second_idle_server_decides_at_same_time() {
        let mut env = build(instance(
            vec![step(0, 0.0, 60.0, vec![10.0, 12.0]), step(1, 0.0, 60.0, vec![10.0, 12.0])],
            2,
        ));
        env.step(Action(0)).unwrap();
        assert_eq!(env.now(), 0.0);
        assert_eq!(env.selected_server(), Some(ServerId(1)));

        let result = env.step(Action(0)).unwrap();
        let StepKind::Assigned(record) = result.kind else { panic!() };
        assert_eq!(record.client, CustomerId(1));
        assert_eq!(record.server, ServerId(1));
        assert_eq!(record.end, 12.0);
    }

    #[test]
    fn busy_server_defers_next_decision() {
        let mut env = build(instance(
            vec![step(0, 0.0, 60.0, vec![10.0]), step(1, 0.0, 60.0, vec![10.0])],
            1,
        ));
        env.step(Action(0)).unwrap();
        assert_eq!(env.now(), 10.0);

        let result = env.step(Action(0)).unwrap();
        let StepKind::Assigned(record) = result.kind else { panic!() };
        assert_eq!(record.start, 10.0);
        // 20 − 0.5 × 10 minutes waited
        assert_eq!(result.reward, 15.0);
    }

    #[test]
    fn unavailable_server_not_offered() {
        let mut inst = single_customer();
        inst.timeline[0].abandonment_time = 60.0;
        inst.unavailability = vec![Unavailability { server: ServerId(0), start: 0.0, end: 15.0 }];
        let env = build(inst);
        assert_eq!(env.now(), 15.0);
        assert_eq!(env.selected_server(), Some(ServerId(0)));
    }

    #[test]
    fn customer_past_deadline_abandons() {
        let mut env = build(instance(vec![step(0, 0.0, 10.0, vec![10.0])], 1));
        env.step(Action(K)).unwrap();
        assert_eq!(env.state(), EnvState::Terminated);
        assert_eq!(env.now(), 10.0);
        assert_eq!(env.drain_abandoned(), vec![(10.0, CustomerId(0))]);
        assert_eq!(env.summary().abandoned, 1);
    }

    #[test]
    fn urgent_appointment_is_only_choice() {
        let mut inst = instance(
            vec![step(0, 0.0, 60.0, vec![10.0]), step(1, 0.0, 60.0, vec![10.0])],
            1,
        );
        inst.appointments = vec![Appointment { client: CustomerId(1), time: 0.5 }];
        let mut env = build(inst);

        let mask = env.action_mask();
        assert!(!mask.is_legal(Action(0)));
        assert!(mask.is_legal(Action(1)));

        let result = env.step(Action(1)).unwrap();
        assert_eq!(result.reward, 50.0);
    }
}

// ── Episodes ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod episode_tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        decisions:   usize,
        assignments: usize,
        abandons:    usize,
        steps:       usize,
        ends:        usize,
    }

    impl EpisodeObserver for Counting {
        fn on_decision(&mut self, _now: f64, waiting: usize) {
            assert!(waiting > 0);
            self.decisions += 1;
        }
        fn on_assignment(&mut self, _record: &qs_core::AssignmentRecord) {
            self.assignments += 1;
        }
        fn on_abandon(&mut self, _now: f64, _customer: CustomerId) {
            self.abandons += 1;
        }
        fn on_step(&mut self, _step: &crate::StepResult) {
            self.steps += 1;
        }
        fn on_episode_end(&mut self, _summary: &EpisodeSummary) {
            self.ends += 1;
        }
    }

    fn no_overlap(schedule: &[qs_core::AssignmentRecord]) -> bool {
        let mut rows = schedule.to_vec();
        rows.sort_by(|a, b| a.server.cmp(&b.server).then(a.start.total_cmp(&b.start)));
        rows.windows(2)
            .all(|w| w[0].server != w[1].server || w[1].start >= w[0].end - 1e-4)
    }

    #[test]
    fn hold_policy_loses_everyone() {
        let mut env = build(instance(
            vec![step(0, 0.0, 10.0, vec![5.0]), step(1, 3.0, 10.0, vec![5.0])],
            1,
        ));
        let mut obs = Counting::default();
        let summary = env.run_episode(&mut HoldPolicy, &mut obs).unwrap();
        assert_eq!(summary.served, 0);
        assert_eq!(summary.abandoned, 2);
        assert!(summary.schedule.is_empty());
        assert_eq!(summary.total_reward, 0.0);
        assert_eq!(obs.abandons, 2);
        assert_eq!(obs.ends, 1);
        assert_eq!(obs.steps, obs.decisions);
    }

    #[test]
    fn first_legal_policy_on_generated_scenario() {
        let config = EnvConfig { mode: Mode::Train, seed: 11, ..test_config() };
        let mut env = EnvBuilder::new(config)
            .generator(ScenarioGenerator { customers: 60, ..Default::default() })
            .build()
            .unwrap();

        let mut obs = Counting::default();
        let summary = env.run_episode(&mut FirstLegalPolicy, &mut obs).unwrap();

        assert_eq!(summary.served + summary.abandoned, 60);
        assert_eq!(summary.served, summary.schedule.len());
        assert_eq!(obs.assignments, summary.served);
        assert_eq!(obs.abandons, summary.abandoned);
        assert_eq!(summary.invalid_actions, 0);
        assert!(summary.schedule.iter().all(|r| r.start >= r.arrival));
        assert!(no_overlap(&summary.schedule));
        assert_eq!(env.state(), EnvState::Terminated);
    }

    #[test]
    fn train_reset_draws_new_scenario() {
        let config = EnvConfig { mode: Mode::Train, ..test_config() };
        let mut env = EnvBuilder::new(config)
            .generator(ScenarioGenerator::default())
            .build()
            .unwrap();
        let first = env.instance().clone();
        env.reset().unwrap();
        assert_ne!(&first, env.instance());
    }

    #[test]
    fn first_episode_plays_scenario_drawn_at_build() {
        let config = EnvConfig { mode: Mode::Train, seed: 5, ..test_config() };
        let mut env = EnvBuilder::new(config)
            .generator(ScenarioGenerator { customers: 20, ..Default::default() })
            .build()
            .unwrap();
        let drawn = env.instance().clone();

        env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver).unwrap();
        assert_eq!(&drawn, env.instance());

        env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver).unwrap();
        assert_ne!(&drawn, env.instance());
    }

    #[test]
    fn stepped_env_is_reset_before_episode() {
        let two = instance(
            vec![step(0, 0.0, 30.0, vec![10.0]), step(1, 0.0, 30.0, vec![10.0])],
            1,
        );
        let expected = build(two.clone())
            .run_episode(&mut FirstLegalPolicy, &mut NoopObserver)
            .unwrap();

        let mut env = build(two);
        env.step(Action(0)).unwrap();
        let summary = env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver).unwrap();
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_reset_replays_instance() {
        let mut env = build(single_customer());
        let a = env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver).unwrap();
        let b = env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_reward, 20.0);
    }

    #[test]
    fn stuck_policy_is_stopped() {
        let config = EnvConfig { max_invalid_streak: 5, ..test_config() };
        let mut env = EnvBuilder::new(config).instance(single_customer()).build().unwrap();
        let mut policy = |_: &Observation, _: &ActionMask| Action(3);
        let result = env.run_episode(&mut policy, &mut NoopObserver);
        assert!(matches!(result, Err(EnvError::PolicyStuck(5))));
    }
}
