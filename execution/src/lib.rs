//! Croupier simulation engine.
//!
//! This crate plays roulette betting strategies against a European wheel and
//! reduces many independent trials to a handful of statistics: mean ending
//! money, mean money of bankrupt trials, mean round count and win percentage.
//!
//! ## Determinism requirements
//! - All randomness comes from a seed; a [`Simulation`] without an explicit seed
//!   draws one and reports it through [`Simulation::seed`].
//! - Chunk results are merged in chunk order, never in completion order.
//!
//! ## Termination
//! Every trial ends either with the objective reached or with the next stake
//! exceeding the bankroll. Policies are built so that one of the two happens
//! with probability one; `max_rounds` turns a policy bug into an error instead
//! of a hang.
//!
//! ## Example
//! ```rust,ignore
//! use croupier_execution::Simulation;
//! use croupier_types::{SimulationConfig, Strategy};
//!
//! let config = SimulationConfig::new(Strategy::Martingale, 100.0, 1.25, 100_000);
//! let stats = Simulation::new(config)?.with_seed(7).run()?;
//! println!("{:.2}% of trials reached the objective", stats.win_percentage);
//! ```

use croupier_types::{ConfigError, Strategy};
use thiserror::Error;

pub mod aggregate;
pub mod policy;
pub mod trial;
pub mod wheel;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use aggregate::{run_trials, Accumulator, Simulation, CHUNK_TRIALS};
pub use policy::{Escalation, Policy};
pub use trial::{play_trial, TrialState};
pub use wheel::{resolve, Resolution, SpinSource, Target, Wager, Wheel};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{strategy} trial exceeded {max_rounds} rounds without terminating")]
    RoundLimitExceeded { strategy: Strategy, max_rounds: u64 },
}
