//! # Shufflegrind Configuration System
//!
//! Layered configuration for the shuffle grinding experiment.
//!
//! ## Features
//! - **Unified Configuration**: one document for experiment, pacing and telemetry
//! - **Validation**: field ranges and formats checked before any run starts
//! - **Environment Awareness**: per-environment files and `SHUFFLEGRIND_*` overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod experiment;
mod pacing;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use experiment::ExperimentConfig;
pub use pacing::PacingConfig;
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/shufflegrind.yaml";
const ENV_PREFIX: &str = "SHUFFLEGRIND_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct ShufflegrindConfig {
    /// Roster, rounds and seed.
    #[validate(nested)]
    #[serde(default)]
    pub experiment: ExperimentConfig,

    /// Progress and verbose pacing.
    #[validate(nested)]
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Logging and metrics.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ShufflegrindConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/shufflegrind.yaml` - Base settings. If missing, defaults are used.
    /// 3. `config/<SHUFFLEGRIND_ENV>.yaml` - Environment‑specific overrides.
    /// 4. `SHUFFLEGRIND_*` environment variables (`__` separates sections).
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ShufflegrindConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        }

        if let Ok(env) = std::env::var("SHUFFLEGRIND_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::finish(figment)
    }

    /// Load configuration from a specific path, still honouring environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(ShufflegrindConfig::default()))
            .merge(Yaml::file(path));
        Self::finish(figment)
    }

    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["env"]).split("__"))
            .extract()?;
        config.check()?;
        Ok(config)
    }

    /// Field validation followed by cross‑field consistency checks.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        self.experiment.check_consistency()
    }
}
