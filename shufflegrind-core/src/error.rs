use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Active validator roster is empty")]
    EmptyRoster,
}

impl ProtocolError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ProtocolError::InvalidConfiguration(reason.into())
    }
}
