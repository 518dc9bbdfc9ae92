//! The round loop shared by every strategy.

use croupier_types::{SimulationConfig, TrialOutcome, TrialResult};
use tracing::warn;

use crate::policy::Policy;
use crate::wheel::{resolve, total_stake, Resolution, SpinSource, Wager};
use crate::SimulationError;

/// Mutable state of one trial.
#[derive(Clone, Debug)]
pub struct TrialState {
    pub money: f64,
    /// Bet size the next round is placed at.
    pub bet: f64,
    pub rounds: u64,
    pub target_money: f64,
    wagers: Vec<Wager>,
}

impl TrialState {
    pub fn new(policy: &Policy, config: &SimulationConfig) -> Self {
        let money = config.initial_money;
        let target_money = config.target_money();
        Self {
            money,
            bet: policy.opening_bet(money, target_money),
            rounds: 0,
            target_money,
            wagers: Vec::with_capacity(8),
        }
    }

    /// Wagers placed in the last round played.
    pub fn wagers(&self) -> &[Wager] {
        &self.wagers
    }

    /// Stake the current bet, spin and settle, then size the next bet.
    pub fn play_round<S: SpinSource>(&mut self, policy: &Policy, wheel: &mut S) -> Resolution {
        policy.place(self.bet, &mut self.wagers);
        self.money -= total_stake(&self.wagers);

        let outcome = wheel.spin();
        let resolution = resolve(&self.wagers, outcome);
        self.money = policy.settle(self.money + resolution.returned);
        self.rounds += 1;

        self.bet = policy.next_bet(self, resolution.won);
        resolution
    }

    fn finish(&self, outcome: TrialOutcome) -> TrialResult {
        TrialResult {
            ending_money: self.money,
            rounds: self.rounds,
            outcome,
        }
    }
}

/// Play one trial from the initial bankroll to a terminal state.
///
/// Terminal checks run before every round, including the first: a bankroll
/// that already meets the objective (objective <= 1) or cannot cover the
/// opening stake ends after 0 rounds.
pub fn play_trial<S: SpinSource>(
    policy: &Policy,
    config: &SimulationConfig,
    wheel: &mut S,
) -> Result<TrialResult, SimulationError> {
    let mut state = TrialState::new(policy, config);
    loop {
        if let Some(outcome) = policy.is_terminal(&state) {
            return Ok(state.finish(outcome));
        }
        if state.rounds >= config.max_rounds {
            warn!(
                strategy = %config.strategy,
                max_rounds = config.max_rounds,
                money = state.money,
                bet = state.bet,
                "trial did not terminate"
            );
            return Err(SimulationError::RoundLimitExceeded {
                strategy: config.strategy,
                max_rounds: config.max_rounds,
            });
        }
        state.play_round(policy, wheel);
    }
}
