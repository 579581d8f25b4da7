//! The `DecisionEnv` struct and its event loop.

use qs_core::{AssignmentRecord, CustomerId, Instance, ScenarioGenerator, ServerId, SimRng};
use qs_policy::{Action, ActionMask, DecisionStrategy, EnvView, Observation, Policy, Resolution};
use qs_queue::{AppointmentBook, CustomerRegistry, Event, EventEngine, QueueError, ServerPool};
use tracing::{debug, info, warn};

use crate::{EnvConfig, EnvError, EnvResult, EpisodeObserver};

// ── Step and episode results ──────────────────────────────────────────────────

/// Whether the environment is waiting for an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnvState {
    /// A server is waiting for a decision.
    Running,
    /// Nobody is waiting, nobody is due to arrive, and every server is free.
    Terminated,
}

/// What a step did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepKind {
    Assigned(AssignmentRecord),
    Held,
    /// Rejected; the state is unchanged.
    Invalid,
}

/// The result of one [`DecisionEnv::step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepResult {
    pub kind:       StepKind,
    pub reward:     f64,
    /// Simulated time after the step (at the next decision point, or at the
    /// end of the episode).
    pub now:        f64,
    pub terminated: bool,
}

/// Totals for a finished episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSummary {
    /// Every assignment, in the order it was made.
    pub schedule:        Vec<AssignmentRecord>,
    pub total_reward:    f64,
    pub steps:           usize,
    pub invalid_actions: usize,
    pub served:          usize,
    pub abandoned:       usize,
    pub end_time:        f64,
}

/// Where a reset gets its scenario.
pub(crate) struct ScenarioSource {
    pub(crate) generator: ScenarioGenerator,
    pub(crate) rng:       SimRng,
}

// ── DecisionEnv ───────────────────────────────────────────────────────────────

/// The decision environment.
///
/// `DecisionEnv<S>` owns all episode state (clock, customers, servers,
/// appointments, the growing schedule) and delegates every scenario-specific
/// choice to the strategy `S`:
///
/// 1. **Observe**: [`observe`][Self::observe] and
///    [`action_mask`][Self::action_mask] describe the current decision point.
/// 2. **Step**: [`step`][Self::step] resolves one action, mutates state,
///    scores it, and advances to the next decision point.
///
/// Create via [`EnvBuilder`][crate::EnvBuilder].
pub struct DecisionEnv<S: DecisionStrategy> {
    pub(crate) config:   EnvConfig,
    pub(crate) strategy: S,

    /// Fresh scenarios for `Train` resets; `None` replays `instance`.
    pub(crate) source:   Option<ScenarioSource>,

    /// The scenario of the current episode.
    pub(crate) instance: Instance,

    pub(crate) engine:       EventEngine,
    pub(crate) customers:    CustomerRegistry,
    pub(crate) servers:      ServerPool,
    pub(crate) appointments: AppointmentBook,

    pub(crate) schedule:        Vec<AssignmentRecord>,
    pub(crate) state:           EnvState,
    pub(crate) selected_server: Option<ServerId>,

    pub(crate) total_reward:    f64,
    pub(crate) steps:           usize,
    pub(crate) invalid_actions: usize,

    /// Abandonments since the last `drain_abandoned`.
    pub(crate) abandoned_log: Vec<(f64, CustomerId)>,

    /// Nothing has been stepped or drained since the last reset.
    pub(crate) fresh: bool,
}

impl<S: DecisionStrategy> DecisionEnv<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Start a new episode and return the first observation and mask.
    ///
    /// In `Train` mode with a generator, a fresh scenario is drawn; otherwise
    /// the same instance is replayed.
    pub fn reset(&mut self) -> EnvResult<(Observation, ActionMask)> {
        if let Some(source) = &mut self.source {
            let instance = source.generator.generate(&mut source.rng)?;
            instance.check()?;
            self.instance = instance;
        }

        self.customers = CustomerRegistry::from_timeline(&self.instance.timeline)?;
        self.servers = ServerPool::from_instance(&self.instance);
        self.appointments = AppointmentBook::new(&self.instance.appointments);

        self.engine.reset();
        for step in &self.instance.timeline {
            self.engine.schedule(step.arrival_time, Event::Arrival(step.client));
            self.engine.schedule(step.abandonment_time, Event::Abandonment(step.client));
        }
        for window in &self.instance.unavailability {
            self.engine.schedule(window.end, Event::WindowEnd(window.server));
        }

        self.schedule.clear();
        self.abandoned_log.clear();
        self.total_reward = 0.0;
        self.steps = 0;
        self.invalid_actions = 0;
        self.selected_server = None;
        self.state = EnvState::Running;

        self.advance_to_decision()?;
        self.fresh = true;
        Ok((self.observe(), self.action_mask()))
    }

    /// Apply one action at the current decision point.
    ///
    /// Returns [`EnvError::Terminated`] once the episode is over.
    pub fn step(&mut self, action: Action) -> EnvResult<StepResult> {
        if self.state == EnvState::Terminated {
            return Err(EnvError::Terminated);
        }
        self.fresh = false;
        self.steps += 1;

        let resolution = self.strategy.resolve_action(&self.view(), action);
        let (kind, reward) = match resolution {
            Resolution::Invalid => {
                self.invalid_actions += 1;
                warn!(%action, now = self.now(), "invalid action penalised");
                (StepKind::Invalid, self.config.invalid_action_penalty)
            }
            Resolution::Hold => {
                self.hold()?;
                (StepKind::Held, 0.0)
            }
            Resolution::Assign(customer) => {
                let (record, reward) = self.assign(customer)?;
                self.advance_to_decision()?;
                (StepKind::Assigned(record), reward)
            }
        };
        self.total_reward += reward;

        debug!(%action, ?kind, reward, now = self.now(), "step");
        Ok(StepResult {
            kind,
            reward,
            now:        self.now(),
            terminated: self.state == EnvState::Terminated,
        })
    }

    /// Start an episode, then let `policy` drive it to its terminal state.
    ///
    /// An environment untouched since its last reset (including the reset
    /// inside `build`) is used as-is, so a `Train` scenario drawn there is
    /// played rather than replaced.  Otherwise the environment is reset first.
    pub fn run_episode<P, O>(&mut self, policy: &mut P, observer: &mut O) -> EnvResult<EpisodeSummary>
    where
        P: Policy + ?Sized,
        O: EpisodeObserver,
    {
        if !self.fresh {
            self.reset()?;
        }
        self.fresh = false;
        self.flush_abandoned(observer);

        let mut invalid_streak = 0;
        while self.state == EnvState::Running {
            let observation = self.observe();
            let mask = self.action_mask();
            observer.on_decision(self.now(), self.customers.waiting_count());

            let action = policy.decide(&observation, &mask);
            let step = self.step(action)?;

            match &step.kind {
                StepKind::Assigned(record) => {
                    invalid_streak = 0;
                    observer.on_assignment(record);
                }
                StepKind::Held => invalid_streak = 0,
                StepKind::Invalid => {
                    invalid_streak += 1;
                    if invalid_streak >= self.config.max_invalid_streak {
                        return Err(EnvError::PolicyStuck(invalid_streak));
                    }
                }
            }
            self.flush_abandoned(observer);
            observer.on_step(&step);
        }

        let summary = self.summary();
        info!(
            served = summary.served,
            abandoned = summary.abandoned,
            invalid = summary.invalid_actions,
            total_reward = summary.total_reward,
            end_time = summary.end_time,
            "episode finished"
        );
        observer.on_episode_end(&summary);
        Ok(summary)
    }

    /// Observation of the current decision point.
    pub fn observe(&self) -> Observation {
        self.strategy.build_observation(&self.view())
    }

    /// Legal actions at the current decision point.
    pub fn action_mask(&self) -> ActionMask {
        self.strategy.compute_mask(&self.view())
    }

    /// Totals so far (final once the episode has terminated).
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            schedule:        self.schedule.clone(),
            total_reward:    self.total_reward,
            steps:           self.steps,
            invalid_actions: self.invalid_actions,
            served:          self.customers.served_count(),
            abandoned:       self.customers.abandoned_count(),
            end_time:        self.now(),
        }
    }

    /// Abandonments since the last call, as `(time, customer)`.
    pub fn drain_abandoned(&mut self) -> Vec<(f64, CustomerId)> {
        self.fresh = false;
        std::mem::take(&mut self.abandoned_log)
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.engine.now()
    }

    #[inline]
    pub fn state(&self) -> EnvState {
        self.state
    }

    /// The server requesting the current decision.
    #[inline]
    pub fn selected_server(&self) -> Option<ServerId> {
        self.selected_server
    }

    /// Assignment records appended so far this episode.
    pub fn schedule(&self) -> &[AssignmentRecord] {
        &self.schedule
    }

    /// The scenario of the current episode.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    pub fn servers(&self) -> &ServerPool {
        &self.servers
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    // ── Core loop ─────────────────────────────────────────────────────────

    fn view(&self) -> EnvView<'_> {
        EnvView::new(
            self.engine.now(),
            &self.customers,
            &self.servers,
            &self.appointments,
            self.selected_server,
        )
    }

    /// Admit `customer` to the selected server at the current time.
    fn assign(&mut self, customer: CustomerId) -> EnvResult<(AssignmentRecord, f64)> {
        let server = self.selected_server.ok_or(EnvError::NoDecisionPending)?;
        let now = self.engine.now();

        // Score before mutating so the strategy sees the decision-time state.
        let reward = {
            let served = self
                .customers
                .get(customer)
                .ok_or(QueueError::UnknownCustomer(customer))?;
            self.strategy.compute_reward(&self.view(), served)
        };

        let served = self.customers.serve(customer)?;
        let assignment = self.servers.assign(server, served, now)?;
        let record = AssignmentRecord {
            client:         customer,
            server,
            arrival:        served.arrival_time,
            start:          assignment.start,
            real_proc_time: assignment.real_proc_time,
            end:            assignment.end,
        };

        self.engine.schedule(assignment.end, Event::ServerFree(server));
        self.schedule.push(record);
        Ok((record, reward))
    }

    /// Let the next event batch happen, then find the next decision point.
    fn hold(&mut self) -> EnvResult<()> {
        self.selected_server = None;
        if let Some((now, events)) = self.engine.pop_next() {
            self.apply_events(now, &events)?;
        }
        self.advance_to_decision()
    }

    /// Pop events until a customer is waiting and a server is available, or
    /// until nothing is left to happen.
    fn advance_to_decision(&mut self) -> EnvResult<()> {
        loop {
            let now = self.engine.now();
            for customer in self.customers.abandon_expired(now) {
                debug!(%customer, now, "customer abandoned");
                self.abandoned_log.push((now, customer));
            }

            if self.customers.waiting_count() > 0 {
                if let Some(server) = self.servers.first_available(now) {
                    self.selected_server = Some(server);
                    self.state = EnvState::Running;
                    return Ok(());
                }
            }

            // Leftover events (stale deadlines, window ends) cannot create
            // work once everyone has arrived and left and every server is free.
            let drained = self.customers.waiting_count() == 0
                && self.customers.pending_count() == 0
                && !self.servers.any_busy(now);

            let next = if drained { None } else { self.engine.pop_next() };
            match next {
                Some((at, events)) => self.apply_events(at, &events)?,
                None => {
                    self.selected_server = None;
                    self.state = EnvState::Terminated;
                    return Ok(());
                }
            }
        }
    }

    fn apply_events(&mut self, now: f64, events: &[Event]) -> EnvResult<()> {
        for event in events {
            match *event {
                Event::Arrival(customer) => self.customers.arrive(customer)?,
                // Completions, window ends, and deadlines only matter through
                // the availability and expiry checks in `advance_to_decision`.
                Event::ServerFree(_) | Event::WindowEnd(_) | Event::Abandonment(_) => {}
            }
        }
        debug!(now, events = events.len(), "events applied");
        Ok(())
    }

    fn flush_abandoned<O: EpisodeObserver>(&mut self, observer: &mut O) {
        for (now, customer) in self.abandoned_log.drain(..) {
            observer.on_abandon(now, customer);
        }
    }
}
