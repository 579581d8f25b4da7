//! qs-eval: evaluate a rule-based policy over a directory of instances.
//!
//! ```text
//! qs-eval [CONFIG.json] [hold|first|random]
//! qs-eval generate DIR COUNT [SEED]
//! ```
//!
//! A lone argument naming a policy selects that policy; any other lone
//! argument is a config path.  Without a config file the defaults of `BatchConfig` are used (instances
//! 0..50 in `./data`, schedules written to `./results`).  Log verbosity
//! follows `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qs_core::{ScenarioGenerator, SimRng};
use qs_eval::{BatchConfig, TotalRewardScorer, evaluate_batch, load_json, save_instance};
use qs_policy::{Action, ActionMask, FirstLegalPolicy, HoldPolicy, Observation, Policy, RandomLegalPolicy};

// ── Policy selection ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum PolicyKind {
    Hold,
    FirstLegal,
    Random,
}

impl PolicyKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "hold"   => Some(Self::Hold),
            "first"  => Some(Self::FirstLegal),
            "random" => Some(Self::Random),
            _        => None,
        }
    }

    fn parse(name: &str) -> Result<Self> {
        match Self::from_name(name) {
            Some(kind) => Ok(kind),
            None       => bail!("unknown policy `{name}` (expected hold, first, or random)"),
        }
    }
}

enum CliPolicy {
    Hold(HoldPolicy),
    FirstLegal(FirstLegalPolicy),
    Random(RandomLegalPolicy),
}

impl CliPolicy {
    fn new(kind: PolicyKind, seed: u64, instance: u32, run: usize) -> Self {
        match kind {
            PolicyKind::Hold       => Self::Hold(HoldPolicy),
            PolicyKind::FirstLegal => Self::FirstLegal(FirstLegalPolicy),
            PolicyKind::Random     => {
                let rng = SimRng::new(seed).child((u64::from(instance) << 16) | run as u64);
                Self::Random(RandomLegalPolicy::new(rng))
            }
        }
    }
}

impl Policy for CliPolicy {
    fn decide(&mut self, observation: &Observation, mask: &ActionMask) -> Action {
        match self {
            Self::Hold(p)       => p.decide(observation, mask),
            Self::FirstLegal(p) => p.decide(observation, mask),
            Self::Random(p)     => p.decide(observation, mask),
        }
    }
}

// ── Argument parsing ──────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Evaluate { config: Option<&'a str>, policy: PolicyKind },
    Generate { dir: &'a str, count: &'a str, seed: Option<&'a str> },
}

fn parse_args<'a>(args: &[&'a str]) -> Result<Command<'a>> {
    Ok(match *args {
        ["generate", dir, count]       => Command::Generate { dir, count, seed: None },
        ["generate", dir, count, seed] => Command::Generate { dir, count, seed: Some(seed) },
        ["generate", ..]               => bail!("usage: qs-eval generate DIR COUNT [SEED]"),
        []                             => Command::Evaluate { config: None, policy: PolicyKind::FirstLegal },
        [arg] => match PolicyKind::from_name(arg) {
            Some(policy) => Command::Evaluate { config: None, policy },
            None         => Command::Evaluate { config: Some(arg), policy: PolicyKind::FirstLegal },
        },
        [config, policy]               => Command::Evaluate { config: Some(config), policy: PolicyKind::parse(policy)? },
        _                              => bail!("usage: qs-eval [CONFIG.json] [hold|first|random]"),
    })
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn evaluate(config_path: Option<&str>, policy: PolicyKind) -> Result<()> {
    let config: BatchConfig = match config_path {
        Some(path) => load_json(Path::new(path)).with_context(|| format!("loading {path}"))?,
        None       => BatchConfig::default(),
    };
    info!(
        data = %config.data_dir.display(),
        results = %config.results_dir.display(),
        instances = config.instance_ids.len(),
        runs = config.runs_per_instance,
        "starting batch"
    );

    let seed = config.env.seed;
    let report = evaluate_batch(
        &config,
        |instance, run| CliPolicy::new(policy, seed, instance, run),
        &TotalRewardScorer,
    )?;

    if let Some(failure) = &report.failure {
        println!(
            "Error in instance {} (run {}, {}): {}",
            failure.instance,
            failure.run,
            failure.path.display(),
            failure.violation
        );
    }
    println!(
        "Evaluated {} run(s), skipped {} instance(s)",
        report.evaluated_runs(),
        report.skipped.len()
    );
    println!("Final score: {}", report.score);
    Ok(())
}

fn generate(dir: &str, count: &str, seed: Option<&str>) -> Result<()> {
    let dir = PathBuf::from(dir);
    let count: u32 = count.parse().with_context(|| format!("invalid count `{count}`"))?;
    let seed: u64 = seed.map(str::parse::<u64>).transpose().context("invalid seed")?.unwrap_or(0);

    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let generator = ScenarioGenerator::default();
    let mut rng = SimRng::new(seed);
    for id in 0..count {
        let instance = generator.generate(&mut rng)?;
        save_instance(&dir, id, &instance)?;
    }
    println!("Wrote {count} instance(s) to {}", dir.display());
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match parse_args(&args)? {
        Command::Evaluate { config, policy }   => evaluate(config, policy),
        Command::Generate { dir, count, seed } => generate(dir, count, seed),
    }
}
