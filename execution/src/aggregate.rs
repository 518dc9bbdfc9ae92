//! Running many trials and reducing them to [`AggregateStats`].
//!
//! Trials are split into fixed-size chunks. Every chunk plays on its own
//! ChaCha20 stream (seed, chunk index) and folds its trials into an
//! [`Accumulator`] of running sums. Chunk accumulators are merged in chunk
//! order, so a given seed yields the same statistics whether chunks run
//! sequentially or on a rayon pool (`parallel` feature).

use croupier_types::{AggregateStats, SimulationConfig, TrialResult};
use rand::Rng;
use tracing::debug;

use crate::policy::Policy;
use crate::trial::play_trial;
use crate::wheel::Wheel;
use crate::SimulationError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Trials played per random stream.
pub const CHUNK_TRIALS: u64 = 4_096;

/// Running sums over terminal trial states.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Accumulator {
    trials: u64,
    losses: u64,
    money_sum: f64,
    loss_money_sum: f64,
    /// Wide enough for `u64::MAX` trials of `u64::MAX` rounds each.
    rounds_sum: u128,
}

impl Accumulator {
    pub fn add(&mut self, result: &TrialResult) {
        self.trials += 1;
        self.money_sum += result.ending_money;
        self.rounds_sum += u128::from(result.rounds);
        if result.is_loss() {
            self.losses += 1;
            self.loss_money_sum += result.ending_money;
        }
    }

    pub fn merge(&mut self, other: &Accumulator) {
        self.trials += other.trials;
        self.losses += other.losses;
        self.money_sum += other.money_sum;
        self.loss_money_sum += other.loss_money_sum;
        self.rounds_sum += other.rounds_sum;
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn losses(&self) -> u64 {
        self.losses
    }

    pub fn finish(&self) -> AggregateStats {
        if self.trials == 0 {
            return AggregateStats {
                trials: 0,
                losses: 0,
                mean_ending_money: 0.0,
                mean_loss_money: None,
                mean_round_count: 0.0,
                win_percentage: 0.0,
            };
        }
        let trials = self.trials as f64;
        AggregateStats {
            trials: self.trials,
            losses: self.losses,
            mean_ending_money: self.money_sum / trials,
            mean_loss_money: (self.losses > 0)
                .then(|| self.loss_money_sum / self.losses as f64),
            mean_round_count: self.rounds_sum as f64 / trials,
            win_percentage: (self.trials - self.losses) as f64 / trials * 100.0,
        }
    }
}

pub(crate) fn run_chunk(
    policy: &Policy,
    config: &SimulationConfig,
    seed: u64,
    chunk: u64,
) -> Result<Accumulator, SimulationError> {
    let start = chunk * CHUNK_TRIALS;
    let end = start.saturating_add(CHUNK_TRIALS).min(config.trial_count);
    let mut wheel = Wheel::seeded(seed, chunk);
    let mut local = Accumulator::default();
    for _ in start..end {
        local.add(&play_trial(policy, config, &mut wheel)?);
    }
    Ok(local)
}

#[cfg(feature = "parallel")]
fn run_chunks(
    policy: &Policy,
    config: &SimulationConfig,
    seed: u64,
    chunks: u64,
) -> Result<Vec<Accumulator>, SimulationError> {
    (0..chunks)
        .into_par_iter()
        .map(|chunk| run_chunk(policy, config, seed, chunk))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_chunks(
    policy: &Policy,
    config: &SimulationConfig,
    seed: u64,
    chunks: u64,
) -> Result<Vec<Accumulator>, SimulationError> {
    (0..chunks)
        .map(|chunk| run_chunk(policy, config, seed, chunk))
        .collect()
}

/// Play `config.trial_count` independent trials of `policy`.
pub fn run_trials(
    policy: &Policy,
    config: &SimulationConfig,
    seed: u64,
) -> Result<AggregateStats, SimulationError> {
    config.validate()?;

    let chunks = config.trial_count.div_ceil(CHUNK_TRIALS);
    let mut total = Accumulator::default();
    for partial in run_chunks(policy, config, seed, chunks)? {
        total.merge(&partial);
    }
    Ok(total.finish())
}

/// A validated configuration ready to be played.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    policy: Policy,
    seed: u64,
}

impl Simulation {
    /// Validate `config` and draw a fresh seed.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let policy = Policy::from_config(&config);
        Ok(Self {
            config,
            policy,
            seed: rand::thread_rng().gen(),
        })
    }

    /// Replace the seed, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn run(&self) -> Result<AggregateStats, SimulationError> {
        debug!(
            strategy = %self.config.strategy,
            initial_money = self.config.initial_money,
            objective = self.config.objective,
            trials = self.config.trial_count,
            seed = self.seed,
            "running simulation"
        );
        let stats = run_trials(&self.policy, &self.config, self.seed)?;
        debug!(
            strategy = %self.config.strategy,
            objective = self.config.objective,
            mean_ending_money = stats.mean_ending_money,
            mean_loss_money = ?stats.mean_loss_money,
            mean_round_count = stats.mean_round_count,
            win_percentage = stats.win_percentage,
            "simulation complete"
        );
        Ok(stats)
    }
}
