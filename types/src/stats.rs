use serde::{Deserialize, Serialize};

/// How a trial ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialOutcome {
    /// Bankroll reached `objective * initial_money`.
    ObjectiveReached,
    /// The next stake could not be covered.
    Bankrupt,
}

/// Terminal snapshot of a single trial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub ending_money: f64,
    pub rounds: u64,
    pub outcome: TrialOutcome,
}

impl TrialResult {
    pub fn is_loss(&self) -> bool {
        self.outcome == TrialOutcome::Bankrupt
    }
}

/// Summary of every trial played for one configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub trials: u64,
    pub losses: u64,
    pub mean_ending_money: f64,
    /// Mean ending money over bankrupt trials, `None` if no trial went bankrupt.
    pub mean_loss_money: Option<f64>,
    pub mean_round_count: f64,
    /// Share of trials that reached the objective, in [0, 100].
    pub win_percentage: f64,
}

impl AggregateStats {
    pub fn wins(&self) -> u64 {
        self.trials - self.losses
    }

    pub fn loss_percentage(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.losses as f64 / self.trials as f64 * 100.0
    }
}
