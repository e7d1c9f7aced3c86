use thiserror::Error;

use shufflegrind_config::ConfigError;
use shufflegrind_engine::engine::EngineError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to set up metrics: {0}")]
    Metrics(String),
}
