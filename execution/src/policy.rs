//! Bet-update rules.
//!
//! Every strategy plays the same round loop (see [`crate::trial`]); a
//! [`Policy`] only decides what to stake, how the bet evolves after a spin and
//! when the trial is over.

use croupier_types::{KerebelMode, SimulationConfig, Strategy, TrialOutcome};

use crate::trial::TrialState;
use crate::wheel::{Target, Wager};

const RED: &[Target] = &[Target::Red];
const RED_EVEN: &[Target] = &[Target::Red, Target::Even];

/// Six-number line covered by the James Bond bet.
const BOND_LINE: [u8; 6] = [13, 14, 15, 16, 17, 18];

/// Units of the zero stake on the high range.
const BOND_HIGH_UNITS: i64 = 14;

/// Units of the zero stake a Bond round is budgeted at.
const BOND_ROUND_UNITS: i64 = 20;

/// How a progression grows its bet after a loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Escalation {
    Multiply(f64),
    Add(f64),
}

impl Escalation {
    pub fn apply(self, bet: f64) -> f64 {
        match self {
            Escalation::Multiply(factor) => bet * factor,
            Escalation::Add(increment) => bet + increment,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Policy {
    /// Equal bets on every target; reset to `base` on any win, escalate when
    /// every target lost.
    Progression {
        targets: &'static [Target],
        base: f64,
        escalation: Escalation,
    },
    /// Bet the gap to the objective on red.
    Kerebel { mode: KerebelMode },
    /// Zero, the 13-18 line and the high range, sized from the bankroll.
    JamesBond,
}

/// Relative slack, in cents, under which a value counts as a whole cent.
const CENT_NOISE: f64 = 1e-9;

/// `value` as a whole number of cents, if it is one up to float noise.
fn exact_cents(value: f64) -> Option<f64> {
    let scaled = value * 100.0;
    let rounded = scaled.round();
    ((scaled - rounded).abs() <= CENT_NOISE * rounded.abs().max(1.0)).then_some(rounded)
}

/// Whole cents contained in `value`.
fn whole_cents(value: f64) -> i64 {
    exact_cents(value).unwrap_or_else(|| (value * 100.0).floor()) as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Zero stake of a Bond round: 5% of the bankroll, in whole cents.
fn bond_unit(money: f64) -> f64 {
    from_cents(whole_cents(money).max(0) / BOND_ROUND_UNITS)
}

fn bond_wagers(unit: f64) -> [Wager; 8] {
    let unit = whole_cents(unit);
    let line = from_cents(unit * 5 / 6);
    let mut wagers = [Wager::new(Target::Number(0), from_cents(unit)); 8];
    for (wager, number) in wagers[1..7].iter_mut().zip(BOND_LINE) {
        *wager = Wager::new(Target::Number(number), line);
    }
    wagers[7] = Wager::new(Target::High, from_cents(BOND_HIGH_UNITS * unit));
    wagers
}

/// Cents a Bond round at `unit` needs on hand.
fn bond_required_cents(unit: f64) -> i64 {
    let unit = whole_cents(unit);
    let stake = unit + BOND_LINE.len() as i64 * (unit * 5 / 6) + BOND_HIGH_UNITS * unit;
    (BOND_ROUND_UNITS * unit).max(stake)
}

impl Policy {
    pub fn progression(targets: &'static [Target], base: f64, escalation: Escalation) -> Self {
        Policy::Progression {
            targets,
            base,
            escalation,
        }
    }

    /// Build the policy a configuration asks for.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let params = &config.params;
        match config.strategy {
            Strategy::Martingale => Self::progression(
                RED,
                params.base_bet,
                Escalation::Multiply(params.martingale_factor),
            ),
            Strategy::DAlembert => Self::progression(
                RED,
                params.base_bet,
                Escalation::Add(params.dalembert_increment),
            ),
            Strategy::RedEvenMartingale => Self::progression(
                RED_EVEN,
                params.base_bet,
                Escalation::Multiply(params.martingale_factor),
            ),
            Strategy::Kerebel => Policy::Kerebel {
                mode: params.kerebel_mode,
            },
            Strategy::JamesBond => Policy::JamesBond,
        }
    }

    /// Bet size for a bankroll that has not been played yet.
    pub fn opening_bet(&self, money: f64, target_money: f64) -> f64 {
        match self {
            Policy::Progression { base, .. } => *base,
            Policy::Kerebel { mode } => kerebel_gap(*mode, money, target_money),
            Policy::JamesBond => bond_unit(money),
        }
    }

    /// Bet size for the next round, given the state after settlement.
    pub fn next_bet(&self, state: &TrialState, won: bool) -> f64 {
        match self {
            Policy::Progression {
                base, escalation, ..
            } => {
                if won {
                    *base
                } else {
                    escalation.apply(state.bet)
                }
            }
            Policy::Kerebel { mode } => kerebel_gap(*mode, state.money, state.target_money),
            Policy::JamesBond => bond_unit(state.money),
        }
    }

    /// Expand a bet size into the wagers placed on the table.
    pub fn place(&self, bet: f64, wagers: &mut Vec<Wager>) {
        wagers.clear();
        match self {
            Policy::Progression { targets, .. } => {
                wagers.extend(targets.iter().map(|target| Wager::new(*target, bet)));
            }
            Policy::Kerebel { .. } => wagers.push(Wager::new(Target::Red, bet)),
            Policy::JamesBond => wagers.extend_from_slice(&bond_wagers(bet)),
        }
    }

    /// Funds that must be on hand to play a round at `bet`.
    ///
    /// Never less than what [`Policy::place`] actually stakes.
    pub fn required_funds(&self, bet: f64) -> f64 {
        match self {
            Policy::Progression { targets, .. } => bet * targets.len() as f64,
            Policy::Kerebel { .. } => bet,
            Policy::JamesBond => from_cents(bond_required_cents(bet)),
        }
    }

    /// Whether the next round cannot be covered.
    pub fn is_insufficient(&self, state: &TrialState) -> bool {
        match self {
            Policy::Kerebel {
                mode: KerebelMode::Hard,
            } => state.money <= 0.0,
            // Compared in cents: 20 x unit never exceeds the bankroll it was cut from
            Policy::JamesBond => {
                whole_cents(state.bet) <= 0
                    || bond_required_cents(state.bet) > whole_cents(state.money)
            }
            _ => self.required_funds(state.bet) > state.money,
        }
    }

    /// Bankroll after settlement, with float drift removed where the strategy
    /// only ever moves whole cents.
    pub fn settle(&self, money: f64) -> f64 {
        match self {
            Policy::JamesBond => exact_cents(money).map_or(money, |cents| cents / 100.0),
            _ => money,
        }
    }

    /// Terminal outcome of the trial, if any.
    ///
    /// Insufficient funds is checked before the objective, so a state that
    /// satisfies both records a loss.
    pub fn is_terminal(&self, state: &TrialState) -> Option<TrialOutcome> {
        if self.is_insufficient(state) {
            return Some(TrialOutcome::Bankrupt);
        }
        if state.money >= state.target_money {
            return Some(TrialOutcome::ObjectiveReached);
        }
        None
    }
}

fn kerebel_gap(mode: KerebelMode, money: f64, target_money: f64) -> f64 {
    let gap = target_money - money;
    match mode {
        KerebelMode::Strict => gap,
        KerebelMode::Hard => gap.min(money),
    }
}
