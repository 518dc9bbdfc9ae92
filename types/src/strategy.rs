use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Betting strategies the engine knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Double the red bet after every loss, reset after a win.
    Martingale,
    /// Add a fixed amount to the red bet after every loss, reset after a win.
    DAlembert,
    /// Martingale sizing on a pair of equal red and even bets.
    RedEvenMartingale,
    /// Stake exactly the gap to the objective on red each round.
    Kerebel,
    /// Zero, the 13-18 line and the high range in fixed proportions.
    JamesBond,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Martingale,
        Strategy::DAlembert,
        Strategy::RedEvenMartingale,
        Strategy::Kerebel,
        Strategy::JamesBond,
    ];

    /// Display name, also accepted by [`Strategy::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Martingale => "Martingale",
            Strategy::DAlembert => "d'Alembert",
            Strategy::RedEvenMartingale => "Red Even Martingale",
            Strategy::Kerebel => "Kerebel",
            Strategy::JamesBond => "James Bond",
        }
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(Strategy::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    /// Names are matched loosely and case-insensitively, so "all-in", "007" and
    /// "dalembert" all resolve. An exact "martingale" wins over the red+even
    /// variant; anything else mentioning martingale must also say "red even".
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.trim().to_lowercase();
        if name == "martingale" {
            return Ok(Strategy::Martingale);
        }
        if name.contains("allin") || name.contains("all-in") || name.contains("kerebel") {
            return Ok(Strategy::Kerebel);
        }
        if name.contains("red even") && name.contains("martingale") {
            return Ok(Strategy::RedEvenMartingale);
        }
        if name.contains("alembert") {
            return Ok(Strategy::DAlembert);
        }
        if name.contains("bond") || name.contains("007") {
            return Ok(Strategy::JamesBond);
        }
        Err(ConfigError::InvalidStrategy {
            name: value.to_string(),
            supported: Self::supported(),
        })
    }
}

impl TryFrom<String> for Strategy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}
