//! Fluent builder for constructing a [`DecisionEnv`].

use qs_core::{Instance, ScenarioGenerator, SimRng};
use qs_policy::{DecisionStrategy, QueueStrategy};
use qs_queue::{AppointmentBook, CustomerRegistry, EventEngine, ServerPool};

use crate::env::ScenarioSource;
use crate::{DecisionEnv, EnvConfig, EnvError, EnvResult, EnvState, Mode};

/// Fluent builder for [`DecisionEnv<S>`].
///
/// # Required inputs
///
/// - [`EnvConfig`]: mode, queue capacity `K`, invalid-action penalty, seed
/// - a scenario: `.instance(i)` (both modes) or `.generator(g)` (`Train` only)
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                  |
/// |-----------------|------------------------------------------|
/// | `.strategy(s)`  | `QueueStrategy::new(config.queue_capacity)` |
///
/// # Example
///
/// ```rust,ignore
/// let mut env = EnvBuilder::new(EnvConfig::default())
///     .instance(instance)
///     .build()?;
/// let summary = env.run_episode(&mut FirstLegalPolicy, &mut NoopObserver)?;
/// ```
pub struct EnvBuilder<S: DecisionStrategy> {
    config:    EnvConfig,
    strategy:  S,
    instance:  Option<Instance>,
    generator: Option<ScenarioGenerator>,
}

impl EnvBuilder<QueueStrategy> {
    /// Create a builder using the standard strategy sized from `config`.
    pub fn new(config: EnvConfig) -> Self {
        let strategy = QueueStrategy::new(config.queue_capacity);
        Self {
            config,
            strategy,
            instance:  None,
            generator: None,
        }
    }
}

impl<S: DecisionStrategy> EnvBuilder<S> {
    /// Replace the decision strategy.
    ///
    /// The strategy's capacity must match `config.queue_capacity`; `build()`
    /// rejects a mismatch.
    pub fn strategy<T: DecisionStrategy>(self, strategy: T) -> EnvBuilder<T> {
        EnvBuilder {
            config:    self.config,
            strategy,
            instance:  self.instance,
            generator: self.generator,
        }
    }

    /// The fixed scenario to replay on every reset.
    pub fn instance(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Draw a fresh scenario on every reset (`Train` mode only).
    pub fn generator(mut self, generator: ScenarioGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Validate inputs, run the first reset, and return an environment
    /// waiting at its first decision point (or already terminated if the
    /// scenario needs no decisions).
    pub fn build(self) -> EnvResult<DecisionEnv<S>> {
        if self.config.queue_capacity == 0 {
            return Err(EnvError::Config("queue_capacity must be at least 1".into()));
        }
        if self.strategy.capacity() != self.config.queue_capacity {
            return Err(EnvError::Config(format!(
                "strategy capacity {} does not match queue_capacity {}",
                self.strategy.capacity(),
                self.config.queue_capacity
            )));
        }

        let source = match (self.config.mode, self.generator) {
            (Mode::Test, Some(_)) => {
                return Err(EnvError::Config(
                    "a scenario generator requires train mode".into(),
                ));
            }
            (Mode::Test, None) if self.instance.is_none() => {
                return Err(EnvError::Config("test mode requires a fixed instance".into()));
            }
            (Mode::Train, None) if self.instance.is_none() => {
                return Err(EnvError::Config(
                    "train mode requires an instance or a scenario generator".into(),
                ));
            }
            (_, generator) => generator.map(|generator| ScenarioSource {
                generator,
                rng: SimRng::new(self.config.seed),
            }),
        };

        let instance = self.instance.unwrap_or_default();
        if source.is_none() {
            instance.check()?;
        }

        let mut env = DecisionEnv {
            config:          self.config,
            strategy:        self.strategy,
            source,
            instance,
            engine:          EventEngine::new(),
            customers:       CustomerRegistry::default(),
            servers:         ServerPool::default(),
            appointments:    AppointmentBook::default(),
            schedule:        Vec::new(),
            state:           EnvState::Terminated,
            selected_server: None,
            total_reward:    0.0,
            steps:           0,
            invalid_actions: 0,
            abandoned_log:   Vec::new(),
            fresh:           false,
        };
        env.reset()?;
        Ok(env)
    }
}
