use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::Strategy;

/// Rounds a single trial may play before the run is aborted.
pub const DEFAULT_MAX_ROUNDS: u64 = 10_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown strategy {name:?} (supported: {supported})")]
    InvalidStrategy { name: String, supported: String },
    #[error("{field} is invalid: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// How the all-in strategy handles a gap larger than the bankroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KerebelMode {
    /// Stop as soon as the gap to the objective exceeds the bankroll.
    #[default]
    Strict,
    /// Keep going all-in with what is left until the bankroll is empty.
    Hard,
}

impl FromStr for KerebelMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Ok(KerebelMode::Strict),
            "hard" => Ok(KerebelMode::Hard),
            other => Err(ConfigError::invalid(
                "kerebel_mode",
                format!("expected strict or hard (got {other:?})"),
            )),
        }
    }
}

/// Tunables for the bet-update rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Bet the progressions open with and reset to after a win.
    pub base_bet: f64,
    /// Multiplier applied after a loss (Martingale and red+even Martingale).
    pub martingale_factor: f64,
    /// Amount added after a loss (d'Alembert).
    pub dalembert_increment: f64,
    pub kerebel_mode: KerebelMode,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            base_bet: 1.0,
            martingale_factor: 2.0,
            dalembert_increment: 2.0,
            kerebel_mode: KerebelMode::Strict,
        }
    }
}

/// One (strategy, bankroll, objective) configuration and how many trials to
/// play it for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub strategy: Strategy,
    pub initial_money: f64,
    /// Target bankroll as a multiple of `initial_money`.
    pub objective: f64,
    pub trial_count: u64,
    #[serde(default)]
    pub params: StrategyParams,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,
}

fn default_max_rounds() -> u64 {
    DEFAULT_MAX_ROUNDS
}

impl SimulationConfig {
    pub fn new(strategy: Strategy, initial_money: f64, objective: f64, trial_count: u64) -> Self {
        Self {
            strategy,
            initial_money,
            objective,
            trial_count,
            params: StrategyParams::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_params(mut self, params: StrategyParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Bankroll at which a trial counts as won.
    pub fn target_money(&self) -> f64 {
        self.objective * self.initial_money
    }

    /// Reject configurations the engine cannot play.
    ///
    /// An objective at or below 1 is accepted: such trials are already at
    /// their target before the first spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trial_count < 1 {
            return Err(ConfigError::invalid("trial_count", "must be at least 1"));
        }
        if !self.initial_money.is_finite() || self.initial_money <= 0.0 {
            return Err(ConfigError::invalid(
                "initial_money",
                format!("must be a positive amount (got {})", self.initial_money),
            ));
        }
        if !self.objective.is_finite() {
            return Err(ConfigError::invalid(
                "objective",
                format!("must be finite (got {})", self.objective),
            ));
        }
        if self.max_rounds < 1 {
            return Err(ConfigError::invalid("max_rounds", "must be at least 1"));
        }
        let params = &self.params;
        if !params.base_bet.is_finite() || params.base_bet <= 0.0 {
            return Err(ConfigError::invalid(
                "base_bet",
                format!("must be a positive amount (got {})", params.base_bet),
            ));
        }
        if !params.martingale_factor.is_finite() || params.martingale_factor <= 1.0 {
            return Err(ConfigError::invalid(
                "martingale_factor",
                format!("must be greater than 1 (got {})", params.martingale_factor),
            ));
        }
        if !params.dalembert_increment.is_finite() || params.dalembert_increment <= 0.0 {
            return Err(ConfigError::invalid(
                "dalembert_increment",
                format!("must be positive (got {})", params.dalembert_increment),
            ));
        }
        Ok(())
    }
}
