//! Strategy x objective sweeps over the croupier engine.
//!
//! [`run_grid`] plays one [`Simulation`] per (strategy, objective) pair of a
//! [`GridConfig`] and collects the results into a [`Report`], which can be
//! rendered as text tables ([`report::render_table`]) or exported as JSON.

use croupier_execution::{Simulation, SimulationError};
use croupier_types::{AggregateStats, SimulationConfig, Strategy, StrategyParams, DEFAULT_MAX_ROUNDS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub mod report;

pub use report::{render_table, Statistic};

#[derive(Debug, Error)]
pub enum GridError {
    #[error("at least one strategy is required")]
    NoStrategies,
    #[error("at least one objective is required")]
    NoObjectives,
    #[error("{strategy} at objective {objective}: {source}")]
    Simulation {
        strategy: Strategy,
        objective: f64,
        #[source]
        source: SimulationError,
    },
}

/// Sweep configuration (from a YAML file and/or command-line flags).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub strategies: Vec<Strategy>,
    pub objectives: Vec<f64>,
    pub initial_money: f64,
    pub trials: u64,
    /// Shared by every cell; drawn at random when unset.
    pub seed: Option<u64>,
    pub log_level: String,
    pub params: StrategyParams,
    pub max_rounds: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            strategies: vec![Strategy::Martingale, Strategy::JamesBond, Strategy::Kerebel],
            objectives: vec![1.05, 1.1, 1.25, 1.5, 2.0],
            initial_money: 100.0,
            trials: 1_000_000,
            seed: None,
            log_level: "info".to_string(),
            params: StrategyParams::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl GridConfig {
    /// Configuration of a single cell of the sweep.
    pub fn simulation(&self, strategy: Strategy, objective: f64) -> SimulationConfig {
        SimulationConfig::new(strategy, self.initial_money, objective, self.trials)
            .with_params(self.params.clone())
            .with_max_rounds(self.max_rounds)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub strategy: Strategy,
    pub objective: f64,
    pub stats: AggregateStats,
}

/// Results of a sweep, one row per (strategy, objective), strategy-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub initial_money: f64,
    pub trials: u64,
    pub seed: u64,
    pub objectives: Vec<f64>,
    pub strategies: Vec<Strategy>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn get(&self, strategy: Strategy, objective: f64) -> Option<&AggregateStats> {
        self.rows
            .iter()
            .find(|row| row.strategy == strategy && row.objective == objective)
            .map(|row| &row.stats)
    }
}

/// Play every (strategy, objective) cell of `config`.
///
/// Every cell uses the same seed, so strategies are compared on the same
/// spin sequences.
pub fn run_grid(config: &GridConfig) -> Result<Report, GridError> {
    if config.strategies.is_empty() {
        return Err(GridError::NoStrategies);
    }
    if config.objectives.is_empty() {
        return Err(GridError::NoObjectives);
    }
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        strategies = config.strategies.len(),
        objectives = config.objectives.len(),
        trials = config.trials,
        seed,
        "starting sweep"
    );

    let mut rows = Vec::with_capacity(config.strategies.len() * config.objectives.len());
    for &strategy in &config.strategies {
        for &objective in &config.objectives {
            let wrap = |source| GridError::Simulation {
                strategy,
                objective,
                source,
            };
            let simulation = Simulation::new(config.simulation(strategy, objective))
                .map_err(wrap)?
                .with_seed(seed);
            let stats = simulation.run().map_err(wrap)?;
            info!(
                %strategy,
                objective,
                win_percentage = stats.win_percentage,
                mean_ending_money = stats.mean_ending_money,
                "cell complete"
            );
            rows.push(ReportRow {
                strategy,
                objective,
                stats,
            });
        }
    }

    Ok(Report {
        initial_money: config.initial_money,
        trials: config.trials,
        seed,
        objectives: config.objectives.clone(),
        strategies: config.strategies.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> GridConfig {
        GridConfig {
            strategies: vec![Strategy::Martingale, Strategy::Kerebel],
            objectives: vec![1.1, 2.0],
            trials: 500,
            seed: Some(42),
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_default_grid() {
        let config = GridConfig::default();
        assert_eq!(config.strategies.len(), 3);
        assert_eq!(config.objectives, vec![1.05, 1.1, 1.25, 1.5, 2.0]);
        assert_eq!(config.initial_money, 100.0);
    }

    #[test]
    fn test_run_grid_fills_every_cell() {
        let report = run_grid(&small_grid()).unwrap();
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.seed, 42);
        let order: Vec<_> = report
            .rows
            .iter()
            .map(|row| (row.strategy, row.objective))
            .collect();
        assert_eq!(
            order,
            vec![
                (Strategy::Martingale, 1.1),
                (Strategy::Martingale, 2.0),
                (Strategy::Kerebel, 1.1),
                (Strategy::Kerebel, 2.0),
            ]
        );
        for row in &report.rows {
            assert_eq!(row.stats.trials, 500);
        }
        assert!(report.get(Strategy::Kerebel, 2.0).is_some());
        assert!(report.get(Strategy::JamesBond, 2.0).is_none());
    }

    #[test]
    fn test_run_grid_is_reproducible() {
        assert_eq!(run_grid(&small_grid()).unwrap(), run_grid(&small_grid()).unwrap());
    }

    #[test]
    fn test_empty_axes_rejected() {
        let mut config = small_grid();
        config.strategies.clear();
        assert!(matches!(run_grid(&config), Err(GridError::NoStrategies)));

        let mut config = small_grid();
        config.objectives.clear();
        assert!(matches!(run_grid(&config), Err(GridError::NoObjectives)));
    }

    #[test]
    fn test_invalid_cell_names_strategy_and_objective() {
        let mut config = small_grid();
        config.trials = 0;
        let err = run_grid(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Martingale"), "{message}");
        assert!(message.contains("trial_count"), "{message}");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = "strategies: [martingale, \"red even martingale\", '007']\nobjectives: [1.5]\ntrials: 10\nseed: 3\nparams:\n  kerebel_mode: hard\n";
        let config: GridConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.strategies,
            vec![
                Strategy::Martingale,
                Strategy::RedEvenMartingale,
                Strategy::JamesBond
            ]
        );
        assert_eq!(config.objectives, vec![1.5]);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.initial_money, 100.0);
        assert_eq!(config.params.kerebel_mode, croupier_types::KerebelMode::Hard);
    }
}
