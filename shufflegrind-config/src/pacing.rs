//! Presentation pacing: progress cadence and the verbose walkthrough.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct PacingConfig {
    /// Print every round and the reshuffles the coalition triggers.
    #[serde(default)]
    pub verbose: bool,

    /// Pause between rounds in verbose mode (milliseconds).
    #[serde(default)]
    #[validate(range(max = 60_000))]
    pub delay_ms: u64,

    /// Rounds between progress log lines.
    #[serde(default = "default_progress_interval")]
    #[validate(range(min = 1))]
    pub progress_interval: usize,
}

fn default_progress_interval() -> usize {
    10_000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            delay_ms: 0,
            progress_interval: default_progress_interval(),
        }
    }
}
