// shufflegrind-config/src/validation.rs
//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate that a validator name prefix is a lowercase identifier.
pub fn validate_id_prefix(prefix: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^[a-z][a-z0-9_]{0,31}$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(prefix) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_id_prefix"))
    }
}

/// Validate a tracing level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        assert!(validate_id_prefix("alice_validator").is_ok());
        assert!(validate_id_prefix("bob2").is_ok());
        assert!(validate_id_prefix("").is_err());
        assert!(validate_id_prefix("Alice").is_err());
        assert!(validate_id_prefix("alice validator").is_err());
        assert!(validate_id_prefix("_alice").is_err());
    }

    #[test]
    fn log_levels() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }
}
