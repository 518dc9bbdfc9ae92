//! Deterministic spin sources for tests.

use crate::wheel::{SpinSource, POCKETS};

/// Replays a fixed list of outcomes, starting over when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedWheel {
    outcomes: Vec<u8>,
    spins: usize,
}

impl ScriptedWheel {
    pub fn new(outcomes: Vec<u8>) -> Self {
        assert!(!outcomes.is_empty(), "script needs at least one outcome");
        assert!(
            outcomes.iter().all(|outcome| *outcome < POCKETS),
            "script contains an outcome that is not on the wheel"
        );
        Self { outcomes, spins: 0 }
    }

    /// Number of spins served so far.
    pub fn spins(&self) -> usize {
        self.spins
    }
}

impl SpinSource for ScriptedWheel {
    fn spin(&mut self) -> u8 {
        let outcome = self.outcomes[self.spins % self.outcomes.len()];
        self.spins += 1;
        outcome
    }
}
