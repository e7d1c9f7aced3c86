//! Experiment parameters: roster composition, round count and seed.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;
use crate::ConfigError;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Validators following the protocol.
    #[serde(default = "default_organic_count")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub organic_count: usize,

    /// Validators controlled by the coalition, reserve included.
    #[serde(default = "default_coalition_count")]
    #[validate(range(min = 2, max = 1_000_000))]
    pub coalition_count: usize,

    /// Blocks produced per phase.
    #[serde(default = "default_rounds")]
    #[validate(range(min = 1, max = 100_000_000))]
    pub rounds: usize,

    /// Seed for the shared random stream.
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_organic_prefix")]
    #[validate(custom(function = validation::validate_id_prefix))]
    pub organic_prefix: String,

    #[serde(default = "default_coalition_prefix")]
    #[validate(custom(function = validation::validate_id_prefix))]
    pub coalition_prefix: String,
}

fn default_organic_count() -> usize {
    80
}

fn default_coalition_count() -> usize {
    20
}

fn default_rounds() -> usize {
    100_000
}

fn default_seed() -> u64 {
    42
}

fn default_organic_prefix() -> String {
    "organic_validator".into()
}

fn default_coalition_prefix() -> String {
    "alice_validator".into()
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            organic_count: default_organic_count(),
            coalition_count: default_coalition_count(),
            rounds: default_rounds(),
            seed: default_seed(),
            organic_prefix: default_organic_prefix(),
            coalition_prefix: default_coalition_prefix(),
        }
    }
}

impl ExperimentConfig {
    /// Checks that survive field validation but break the roster.
    pub fn check_consistency(&self) -> Result<(), ConfigError> {
        if self.organic_prefix == self.coalition_prefix {
            return Err(ConfigError::Inconsistent(format!(
                "organic and coalition validators share the prefix '{}'",
                self.organic_prefix
            )));
        }
        Ok(())
    }
}
