//! Coalition win counting over a recorded history.

use serde::Serialize;

use shufflegrind_core::ValidatorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CoalitionTally {
    pub wins: usize,
    pub rounds: usize,
}

impl CoalitionTally {
    pub fn from_history(history: &[ValidatorId]) -> Self {
        Self {
            wins: history.iter().filter(|v| v.is_coalition()).count(),
            rounds: history.len(),
        }
    }

    /// Share of rounds won, in `[0, 1]`. Zero for an empty history.
    pub fn fraction(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.wins as f64 / self.rounds as f64
    }

    pub fn percentage(&self) -> f64 {
        100.0 * self.fraction()
    }
}

/// Nominal stake share of a coalition holding `coalition` of `total` validators.
pub fn stake_share(coalition: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    coalition as f64 / total as f64
}
