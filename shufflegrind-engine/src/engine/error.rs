use thiserror::Error;

use shufflegrind_config::ConfigError;
use shufflegrind_core::ProtocolError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("History digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("Report rendering error: {0}")]
    Render(#[from] serde_yaml::Error),
}
