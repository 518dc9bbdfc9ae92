//! Common types shared by the croupier engine and simulator.
//!
//! Configuration is validated here so that both the library entrypoint and the
//! command-line runner reject the same inputs with the same errors.

pub mod config;
pub mod stats;
pub mod strategy;

pub use config::{ConfigError, KerebelMode, SimulationConfig, StrategyParams, DEFAULT_MAX_ROUNDS};
pub use stats::{AggregateStats, TrialOutcome, TrialResult};
pub use strategy::Strategy;
