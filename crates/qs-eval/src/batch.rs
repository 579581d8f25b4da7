//! Batch evaluation over a directory of instances.
//!
//! ```text
//! for each instance id (in order):
//!   skip if timeline_{i}.json is missing
//!   for run in 0..runs_per_instance:
//!     ① run a Test-mode episode, streaming result_{i}_{run}.csv
//!     ② validate the written file against the instance
//!     ③ invalid → stop; the batch score is SENTINEL_SCORE
//!     ④ valid   → score the run with the RunScorer
//! score = mean over evaluated runs
//! ```
//!
//! With the `parallel` feature, instances are evaluated concurrently on the
//! rayon pool and folded in id order afterwards, so the first failure (by
//! id) still decides the report.  Instances after it may already have
//! written their files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use qs_core::Instance;
use qs_env::{EnvBuilder, EnvConfig, EpisodeSummary, Mode};
use qs_output::{CsvScheduleWriter, ScheduleOutputObserver};
use qs_policy::Policy;
use qs_validate::{Violation, validate_file};

use crate::loader::load_instance;
use crate::{EvalError, EvalResult};

/// Score of a batch that produced an invalid schedule.
pub const SENTINEL_SCORE: f64 = -1.0;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Batch evaluation settings.  Every field has a default so partial JSON is
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub data_dir:          PathBuf,
    pub results_dir:       PathBuf,
    /// Instances to try, in order.  Ids without a timeline file are skipped.
    pub instance_ids:      Vec<u32>,
    pub runs_per_instance: usize,
    /// Environment settings; `mode` is forced to `Test`.
    pub env:               EnvConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            data_dir:          PathBuf::from("data"),
            results_dir:       PathBuf::from("results"),
            instance_ids:      (0..50).collect(),
            runs_per_instance: 1,
            env:               EnvConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Schedule file for `run` of instance `id`.
    pub fn result_path(&self, id: u32, run: usize) -> PathBuf {
        self.results_dir.join(format!("result_{id}_{run}.csv"))
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Scores one valid run.
pub trait RunScorer: Sync {
    fn score(&self, instance: &Instance, summary: &EpisodeSummary) -> f64;
}

/// Scores a run by its total episode reward.
pub struct TotalRewardScorer;

impl RunScorer for TotalRewardScorer {
    fn score(&self, _instance: &Instance, summary: &EpisodeSummary) -> f64 {
        summary.total_reward
    }
}

impl<F> RunScorer for F
where
    F: Fn(&Instance, &EpisodeSummary) -> f64 + Sync,
{
    fn score(&self, instance: &Instance, summary: &EpisodeSummary) -> f64 {
        self(instance, summary)
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// One valid run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub instance:     u32,
    pub run:          usize,
    pub score:        f64,
    pub total_reward: f64,
    pub served:       usize,
    pub abandoned:    usize,
    pub path:         PathBuf,
}

/// The run whose schedule failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub instance:  u32,
    pub run:       usize,
    pub path:      PathBuf,
    pub violation: Violation,
}

/// Outcome of [`evaluate_batch`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Mean run score, [`SENTINEL_SCORE`] on failure, `0` if nothing ran.
    pub score:   f64,
    /// Valid runs, in evaluation order.
    pub runs:    Vec<RunReport>,
    /// Ids with no timeline file.
    pub skipped: Vec<u32>,
    pub failure: Option<BatchFailure>,
}

impl BatchReport {
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn evaluated_runs(&self) -> usize {
        self.runs.len()
    }
}

/// Runs of one instance, up to and including its first failure.
pub(crate) struct InstanceOutcome {
    pub(crate) runs:    Vec<RunReport>,
    pub(crate) failure: Option<BatchFailure>,
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Evaluate a policy over every instance of `config`.
///
/// `make_policy(instance_id, run)` builds a fresh policy for each run.
/// Environment, I/O, and malformed-instance problems abort with an error;
/// an invalid schedule ends the batch with [`SENTINEL_SCORE`].
pub fn evaluate_batch<P, F, S>(config: &BatchConfig, make_policy: F, scorer: &S) -> EvalResult<BatchReport>
where
    P: Policy,
    F: Fn(u32, usize) -> P + Sync,
    S: RunScorer + ?Sized,
{
    std::fs::create_dir_all(&config.results_dir)
        .map_err(|source| EvalError::Io { path: config.results_dir.clone(), source })?;

    let evaluate = |id: u32| -> EvalResult<Option<InstanceOutcome>> {
        match load_instance(&config.data_dir, id)? {
            Some(instance) => evaluate_instance(config, id, &instance, &make_policy, scorer).map(Some),
            None           => Ok(None),
        }
    };

    let mut report = BatchReport { score: 0.0, runs: Vec::new(), skipped: Vec::new(), failure: None };

    #[cfg(not(feature = "parallel"))]
    {
        for &id in &config.instance_ids {
            if fold(&mut report, id, evaluate(id)?) {
                break;
            }
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let outcomes: Vec<EvalResult<Option<InstanceOutcome>>> =
            config.instance_ids.par_iter().map(|&id| evaluate(id)).collect();
        for (&id, outcome) in config.instance_ids.iter().zip(outcomes) {
            if fold(&mut report, id, outcome?) {
                break;
            }
        }
    }

    report.score = final_score(&report);
    info!(
        score = report.score,
        runs = report.runs.len(),
        skipped = report.skipped.len(),
        valid = report.is_valid(),
        "batch finished"
    );
    Ok(report)
}

pub(crate) fn final_score(report: &BatchReport) -> f64 {
    if report.failure.is_some() {
        SENTINEL_SCORE
    } else if report.runs.is_empty() {
        0.0
    } else {
        report.runs.iter().map(|r| r.score).sum::<f64>() / report.runs.len() as f64
    }
}

/// Merge one instance into the report.  Returns `true` if the batch must stop.
pub(crate) fn fold(report: &mut BatchReport, id: u32, outcome: Option<InstanceOutcome>) -> bool {
    let Some(outcome) = outcome else {
        report.skipped.push(id);
        return false;
    };
    report.runs.extend(outcome.runs);
    report.failure = outcome.failure;
    report.failure.is_some()
}

fn evaluate_instance<P, F, S>(
    config:      &BatchConfig,
    id:          u32,
    instance:    &Instance,
    make_policy: &F,
    scorer:      &S,
) -> EvalResult<InstanceOutcome>
where
    P: Policy,
    F: Fn(u32, usize) -> P,
    S: RunScorer + ?Sized,
{
    let env_config = EnvConfig { mode: Mode::Test, ..config.env.clone() };
    let mut outcome = InstanceOutcome { runs: Vec::new(), failure: None };

    for run in 0..config.runs_per_instance {
        let path = config.result_path(id, run);
        let summary = run_to_file(&env_config, instance, &mut make_policy(id, run), &path)?;

        match judge_run(instance, id, run, path, &summary, scorer) {
            Ok(report) => outcome.runs.push(report),
            Err(failure) => {
                outcome.failure = Some(failure);
                break;
            }
        }
    }
    Ok(outcome)
}

/// Validate the schedule file of one run and score it.
pub(crate) fn judge_run<S: RunScorer + ?Sized>(
    instance: &Instance,
    id:       u32,
    run:      usize,
    path:     PathBuf,
    summary:  &EpisodeSummary,
    scorer:   &S,
) -> Result<RunReport, BatchFailure> {
    if let Err(violation) = validate_file(instance, &path) {
        warn!(instance = id, run, kind = ?violation.kind(), "invalid schedule:\n{violation}");
        return Err(BatchFailure { instance: id, run, path, violation });
    }

    let score = scorer.score(instance, summary);
    info!(instance = id, run, score, served = summary.served, abandoned = summary.abandoned, "run evaluated");
    Ok(RunReport {
        instance:     id,
        run,
        score,
        total_reward: summary.total_reward,
        served:       summary.served,
        abandoned:    summary.abandoned,
        path,
    })
}

/// Run one Test-mode episode on `instance`, writing its schedule to `path`.
pub fn run_to_file<P: Policy + ?Sized>(
    config:   &EnvConfig,
    instance: &Instance,
    policy:   &mut P,
    path:     &Path,
) -> EvalResult<EpisodeSummary> {
    let mut env = EnvBuilder::new(config.clone()).instance(instance.clone()).build()?;
    let mut observer = ScheduleOutputObserver::new(CsvScheduleWriter::new(path)?);
    let summary = env.run_episode(policy, &mut observer)?;
    if let Some(e) = observer.take_error() {
        return Err(e.into());
    }
    Ok(summary)
}
