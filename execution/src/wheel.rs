//! European single-zero wheel.
//!
//! Resolution is stateless: a bet is a list of [`Wager`]s and [`resolve`] maps
//! a spin outcome to the gross amount returned. Stakes are deducted by the
//! caller before the spin; the returned amount includes the original stake.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Number of pockets on the wheel (0-36).
pub const POCKETS: u8 = 37;

/// Gross return (stake included) for a winning single-number bet.
pub const STRAIGHT_RETURN: f64 = 36.0;

/// Gross return (stake included) for a winning even-money bet.
pub const EVEN_MONEY_RETURN: f64 = 2.0;

/// Red numbers on a roulette wheel.
const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Check if a number is red.
pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// What a wager is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Number(u8),
    Red,
    Black,
    Odd,
    Even,
    /// 19-36
    High,
    /// 1-18
    Low,
}

impl Target {
    /// Check if this target wins for a given outcome.
    pub fn wins(self, outcome: u8) -> bool {
        debug_assert!(outcome < POCKETS, "outcome {outcome} is not on the wheel");

        // Zero loses everything except a straight bet on 0
        if outcome == 0 {
            return self == Target::Number(0);
        }

        match self {
            Target::Number(number) => number == outcome,
            Target::Red => is_red(outcome),
            Target::Black => !is_red(outcome),
            Target::Even => outcome % 2 == 0,
            Target::Odd => outcome % 2 == 1,
            Target::High => outcome > 18,
            Target::Low => outcome <= 18,
        }
    }

    /// Gross return per unit staked when this target wins.
    pub fn return_multiplier(self) -> f64 {
        match self {
            Target::Number(_) => STRAIGHT_RETURN,
            Target::Red
            | Target::Black
            | Target::Odd
            | Target::Even
            | Target::High
            | Target::Low => EVEN_MONEY_RETURN,
        }
    }
}

/// A single (target, amount) pair of a bet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wager {
    pub target: Target,
    pub amount: f64,
}

impl Wager {
    pub fn new(target: Target, amount: f64) -> Self {
        Self { target, amount }
    }
}

/// Sum of the amounts of a bet.
pub fn total_stake(wagers: &[Wager]) -> f64 {
    wagers.iter().map(|wager| wager.amount).sum()
}

/// Outcome of settling a bet against one spin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub staked: f64,
    /// Gross amount credited back, winning stakes included.
    pub returned: f64,
    /// At least one wager won.
    pub won: bool,
}

impl Resolution {
    /// Net change to the bankroll for the round.
    pub fn net(&self) -> f64 {
        self.returned - self.staked
    }
}

/// Settle every wager of a bet against `outcome`.
pub fn resolve(wagers: &[Wager], outcome: u8) -> Resolution {
    let mut returned = 0.0;
    let mut won = false;
    for wager in wagers {
        if wager.target.wins(outcome) {
            returned += wager.amount * wager.target.return_multiplier();
            won = true;
        }
    }
    Resolution {
        staked: total_stake(wagers),
        returned,
        won,
    }
}

/// Source of spin outcomes.
pub trait SpinSource {
    /// Next outcome, uniform over 0-36.
    fn spin(&mut self) -> u8;
}

/// Wheel driven by a random number generator.
pub struct Wheel<R: RngCore> {
    rng: R,
}

impl<R: RngCore> Wheel<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Wheel<ChaCha20Rng> {
    /// Wheel on its own ChaCha20 stream.
    ///
    /// Wheels sharing a seed but using different streams produce independent
    /// outcome sequences, so each chunk of trials gets its own stream.
    pub fn seeded(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }
}

impl<R: RngCore> SpinSource for Wheel<R> {
    fn spin(&mut self) -> u8 {
        self.rng.gen_range(0..POCKETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTSIDE: [Target; 6] = [
        Target::Red,
        Target::Black,
        Target::Odd,
        Target::Even,
        Target::High,
        Target::Low,
    ];

    #[test]
    fn test_is_red() {
        assert!(is_red(1));
        assert!(is_red(3));
        assert!(is_red(32));
        assert!(is_red(36));
        assert!(!is_red(2));
        assert!(!is_red(4));
        assert!(!is_red(0));
    }

    #[test]
    fn test_colour_sets_partition_non_zero() {
        for outcome in 1..POCKETS {
            assert_ne!(Target::Red.wins(outcome), Target::Black.wins(outcome));
        }
        let reds = (1..POCKETS).filter(|n| is_red(*n)).count();
        assert_eq!(reds, 18);
    }

    #[test]
    fn test_zero_loses_outside_bets() {
        for target in OUTSIDE {
            let resolution = resolve(&[Wager::new(target, 10.0)], 0);
            assert!(!resolution.won, "{target:?} won on zero");
            assert_eq!(resolution.returned, 0.0);
            assert_eq!(resolution.net(), -10.0);
        }

        let resolution = resolve(&[Wager::new(Target::Number(0), 10.0)], 0);
        assert!(resolution.won);
        assert_eq!(resolution.returned, 360.0);
    }

    #[test]
    fn test_thirty_six() {
        assert!(Target::Red.wins(36));
        assert!(Target::High.wins(36));
        assert!(Target::Even.wins(36));
        assert!(!Target::Black.wins(36));
        assert!(!Target::Low.wins(36));
        assert!(!Target::Odd.wins(36));
        assert!(Target::Number(36).wins(36));
        assert!(!Target::Number(35).wins(36));
    }

    #[test]
    fn test_odd_wins_on_odd_numbers() {
        assert!(Target::Odd.wins(1));
        assert!(Target::Odd.wins(35));
        assert!(!Target::Odd.wins(2));
        assert!(!Target::Odd.wins(0));
        let resolution = resolve(&[Wager::new(Target::Odd, 5.0)], 17);
        assert!(resolution.won);
        assert_eq!(resolution.returned, 10.0);
    }

    #[test]
    fn test_low_high_boundaries() {
        assert!(Target::Low.wins(1));
        assert!(Target::Low.wins(18));
        assert!(!Target::Low.wins(19));
        assert!(Target::High.wins(19));
        assert!(!Target::High.wins(18));
    }

    #[test]
    fn test_high_and_low_report_wins() {
        assert!(resolve(&[Wager::new(Target::High, 1.0)], 20).won);
        assert!(resolve(&[Wager::new(Target::Low, 1.0)], 5).won);
    }

    #[test]
    fn test_multi_wager_bet() {
        // 2 is black and even: the red half loses, the even half pays 2x
        let bet = [Wager::new(Target::Red, 4.0), Wager::new(Target::Even, 4.0)];
        let resolution = resolve(&bet, 2);
        assert!(resolution.won);
        assert_eq!(resolution.staked, 8.0);
        assert_eq!(resolution.returned, 8.0);
        assert_eq!(resolution.net(), 0.0);

        // 11 is black and odd: both lose
        let resolution = resolve(&bet, 11);
        assert!(!resolution.won);
        assert_eq!(resolution.net(), -8.0);
    }

    #[test]
    fn test_seeded_wheel_is_deterministic() {
        let mut a = Wheel::seeded(7, 0);
        let mut b = Wheel::seeded(7, 0);
        let mut c = Wheel::seeded(7, 1);
        let first: Vec<u8> = (0..64).map(|_| a.spin()).collect();
        let second: Vec<u8> = (0..64).map(|_| b.spin()).collect();
        let other: Vec<u8> = (0..64).map(|_| c.spin()).collect();
        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(first.iter().all(|outcome| *outcome < POCKETS));
    }

    #[test]
    fn test_spins_cover_every_pocket() {
        let mut wheel = Wheel::seeded(42, 0);
        let mut seen = [false; POCKETS as usize];
        for _ in 0..10_000 {
            seen[wheel.spin() as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
