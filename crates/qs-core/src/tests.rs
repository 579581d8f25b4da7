//! Unit tests for qs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CustomerId, ServerId, TaskId};

    #[test]
    fn index_roundtrip() {
        let id = CustomerId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CustomerId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CustomerId::INVALID.0, u32::MAX);
        assert_eq!(ServerId::INVALID.0, u32::MAX);
        assert_eq!(TaskId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(ServerId(3).to_string(), "ServerId(3)");
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&CustomerId(7)).unwrap(), "7");
        let id: ServerId = serde_json::from_str("2").unwrap();
        assert_eq!(id, ServerId(2));
    }
}

#[cfg(test)]
mod time {
    use std::collections::BTreeMap;

    use crate::{SimTime, approx_eq};

    #[test]
    fn tolerance_is_inclusive() {
        assert!(approx_eq(10.0, 10.0 + 1e-4));
        assert!(approx_eq(10.0, 10.00005));
        assert!(!approx_eq(10.0, 10.0002));
    }

    #[test]
    fn orders_as_btree_key() {
        let mut map = BTreeMap::new();
        map.insert(SimTime(5.5), 'b');
        map.insert(SimTime(0.25), 'a');
        map.insert(SimTime(12.0), 'c');
        let keys: Vec<f64> = map.keys().map(|t| t.minutes()).collect();
        assert_eq!(keys, vec![0.25, 5.5, 12.0]);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(SimTime(3.0) + 2.5, SimTime(5.5));
        assert_eq!(SimTime(10.0) - SimTime(4.0), 6.0);
    }

    #[test]
    fn display_breaks_into_day_and_clock() {
        assert_eq!(SimTime(1500.0).to_string(), "t=1500.00 (day 1 01:00.00)");
    }
}

#[cfg(test)]
mod instance {
    use crate::{
        Appointment, ArrivalStep, CustomerId, Instance, QsError, ServerId, TaskId, Unavailability,
    };

    fn step(id: u32, task: u16, services: Vec<f64>) -> ArrivalStep {
        ArrivalStep {
            client:             CustomerId(id),
            arrival_time:       id as f64,
            task:               TaskId(task),
            abandonment_time:   id as f64 + 30.0,
            real_service_times: services,
        }
    }

    fn two_server_instance() -> Instance {
        Instance {
            timeline:       vec![step(0, 0, vec![10.0, 12.0]), step(1, 1, vec![5.0, 6.0])],
            average_matrix: vec![vec![10.0, 5.0], vec![12.0, 6.0]],
            appointments:   vec![Appointment { client: CustomerId(1), time: 4.0 }],
            unavailability: vec![Unavailability { server: ServerId(1), start: 0.0, end: 5.0 }],
        }
    }

    #[test]
    fn well_formed_instance_passes() {
        let inst = two_server_instance();
        inst.check().unwrap();
        assert_eq!(inst.server_count(), 2);
        assert_eq!(inst.task_count(), 2);
        assert_eq!(inst.server_ids().collect::<Vec<_>>(), vec![ServerId(0), ServerId(1)]);
    }

    #[test]
    fn non_finite_times_rejected() {
        let mut inst = two_server_instance();
        inst.timeline[0].abandonment_time = f64::NAN;
        assert!(matches!(
            inst.check(),
            Err(QsError::NonFiniteTime { field: "abandonment_time", .. })
        ));

        let mut inst = two_server_instance();
        inst.timeline[1].arrival_time = f64::INFINITY;
        assert!(matches!(inst.check(), Err(QsError::NonFiniteTime { field: "arrival_time", .. })));

        let mut inst = two_server_instance();
        inst.appointments[0].time = f64::NEG_INFINITY;
        assert!(matches!(inst.check(), Err(QsError::NonFiniteTime { .. })));

        let mut inst = two_server_instance();
        inst.unavailability[0].end = f64::NAN;
        assert!(matches!(inst.check(), Err(QsError::NonFiniteTime { field: "window end", .. })));
    }

    #[test]
    fn negative_arrival_time_allowed() {
        let mut inst = two_server_instance();
        inst.timeline[0].arrival_time = -2.0;
        inst.check().unwrap();
    }

    #[test]
    fn bad_durations_rejected() {
        let mut inst = two_server_instance();
        inst.timeline[0].real_service_times[1] = -1.0;
        let err = inst.check().unwrap_err();
        assert!(matches!(err, QsError::InvalidDuration { field: "real_service_times", .. }));
        assert!(err.to_string().contains("-1"));

        let mut inst = two_server_instance();
        inst.timeline[1].real_service_times[0] = f64::NAN;
        assert!(matches!(inst.check(), Err(QsError::InvalidDuration { .. })));

        let mut inst = two_server_instance();
        inst.average_matrix[0][1] = f64::INFINITY;
        assert!(matches!(inst.check(), Err(QsError::InvalidDuration { field: "average_matrix", .. })));

        let mut inst = two_server_instance();
        inst.timeline[0].real_service_times[0] = 0.0;
        inst.check().unwrap();
    }

    #[test]
    fn empty_matrix_rejected() {
        let inst = Instance::default();
        assert!(matches!(inst.check(), Err(QsError::NoServers)));
    }

    #[test]
    fn ragged_matrix_rejected() {
        let mut inst = two_server_instance();
        inst.average_matrix[1].pop();
        assert!(matches!(inst.check(), Err(QsError::RaggedMatrix { .. })));
    }

    #[test]
    fn short_service_vector_rejected() {
        let mut inst = two_server_instance();
        inst.timeline[0].real_service_times.pop();
        assert!(matches!(inst.check(), Err(QsError::ServiceVectorMismatch { .. })));
    }

    #[test]
    fn unknown_task_rejected() {
        let mut inst = two_server_instance();
        inst.timeline[0].task = TaskId(9);
        assert!(matches!(inst.check(), Err(QsError::UnknownTask { .. })));
    }

    #[test]
    fn duplicate_customer_rejected() {
        let mut inst = two_server_instance();
        inst.timeline[1].client = CustomerId(0);
        assert!(matches!(inst.check(), Err(QsError::DuplicateCustomer(CustomerId(0)))));
    }

    #[test]
    fn duplicate_appointment_rejected() {
        let mut inst = two_server_instance();
        inst.appointments.push(Appointment { client: CustomerId(1), time: 9.0 });
        assert!(matches!(inst.check(), Err(QsError::DuplicateAppointment(CustomerId(1)))));
    }

    #[test]
    fn window_on_unknown_server_rejected() {
        let mut inst = two_server_instance();
        inst.unavailability[0].server = ServerId(5);
        assert!(matches!(inst.check(), Err(QsError::UnknownServer(ServerId(5)))));
    }

    #[test]
    fn inverted_window_rejected() {
        let mut inst = two_server_instance();
        inst.unavailability[0].end = -1.0;
        assert!(matches!(inst.check(), Err(QsError::InvertedWindow { .. })));
    }

    #[test]
    fn window_is_half_open() {
        let w = Unavailability { server: ServerId(0), start: 10.0, end: 20.0 };
        assert!(w.contains(10.0));
        assert!(w.contains(19.9));
        assert!(!w.contains(20.0));
    }

    #[test]
    fn json_defaults_optional_lists() {
        let json = r#"{
            "timeline": [{"client": 0, "arrival_time": 0.0, "task": 0,
                          "abandonment_time": 30.0, "real_service_times": [10.0]}],
            "average_matrix": [[10.0]]
        }"#;
        let inst: Instance = serde_json::from_str(json).unwrap();
        assert!(inst.appointments.is_empty());
        assert!(inst.unavailability.is_empty());
        inst.check().unwrap();
    }
}

#[cfg(test)]
mod generator {
    use crate::{QsError, ScenarioGenerator, SimRng};

    #[test]
    fn generated_instance_is_well_formed() {
        let generator = ScenarioGenerator::default();
        let inst = generator.generate(&mut SimRng::new(7)).unwrap();
        inst.check().unwrap();
        assert_eq!(inst.timeline.len(), generator.customers);
        assert_eq!(inst.server_count(), generator.servers);
        assert!(inst.timeline.windows(2).all(|w| w[0].arrival_time <= w[1].arrival_time));
        assert!(inst.timeline.iter().all(|s| s.abandonment_time > s.arrival_time));
    }

    #[test]
    fn same_seed_same_instance() {
        let generator = ScenarioGenerator::default();
        let a = generator.generate(&mut SimRng::new(99)).unwrap();
        let b = generator.generate(&mut SimRng::new(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_ranges_rejected() {
        let generator = ScenarioGenerator { patience: (50.0, 10.0), ..Default::default() };
        assert!(generator.generate(&mut SimRng::new(1)).is_err());

        let generator = ScenarioGenerator { servers: 0, ..Default::default() };
        assert!(generator.generate(&mut SimRng::new(1)).is_err());
    }

    #[test]
    fn non_finite_parameters_rejected() {
        let cases = [
            ScenarioGenerator { appointment_share: f64::NAN, ..Default::default() },
            ScenarioGenerator { appointment_share: 1.5, ..Default::default() },
            ScenarioGenerator { appointment_share: -0.1, ..Default::default() },
            ScenarioGenerator { mean_service: (5.0, f64::INFINITY), ..Default::default() },
            ScenarioGenerator { patience: (f64::NAN, 10.0), ..Default::default() },
            ScenarioGenerator { horizon: f64::INFINITY, ..Default::default() },
        ];
        for generator in cases {
            assert!(
                matches!(generator.generate(&mut SimRng::new(1)), Err(QsError::Config(_))),
                "{generator:?}"
            );
        }
    }

    #[test]
    fn share_bounds_accepted() {
        for share in [0.0, 1.0] {
            let generator = ScenarioGenerator { customers: 10, appointment_share: share, ..Default::default() };
            let inst = generator.generate(&mut SimRng::new(4)).unwrap();
            let expected = if share == 0.0 { 0 } else { 10 };
            assert_eq!(inst.appointments.len(), expected);
        }
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn child_streams_are_deterministic() {
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        let xa: u32 = a.child(1).gen_range(0..1_000_000);
        let xb: u32 = b.child(1).gen_range(0..1_000_000);
        assert_eq!(xa, xb);
    }

    #[test]
    fn gen_bool_nan_is_false() {
        let mut rng = SimRng::new(5);
        assert!((0..20).all(|_| !rng.gen_bool(f64::NAN)));
        assert!(rng.gen_bool(2.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[4]), Some(&4));
    }
}
