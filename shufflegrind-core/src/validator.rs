//! ## shufflegrind-core::validator
//! **Validator identifiers**
//!
//! Every identifier carries its [`Role`], so coalition membership is a field
//! lookup rather than a guess based on the name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the experiment a validator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary staker following the protocol.
    Organic,
    /// Controlled by the adversarial coalition.
    Coalition,
}

/// A named participant eligible to be selected as block producer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidatorId {
    name: String,
    role: Role,
}

impl ValidatorId {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn organic(name: impl Into<String>) -> Self {
        Self::new(name, Role::Organic)
    }

    pub fn coalition(name: impl Into<String>) -> Self {
        Self::new(name, Role::Coalition)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn is_coalition(&self) -> bool {
        self.role == Role::Coalition
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_decides_membership_not_name() {
        // A name that looks adversarial is still organic if tagged so.
        let lookalike = ValidatorId::organic("alice_validator_fan_club");
        assert!(!lookalike.is_coalition());

        let member = ValidatorId::coalition("validator_7");
        assert!(member.is_coalition());
    }

    #[test]
    fn equality_includes_role() {
        assert_ne!(ValidatorId::organic("v0"), ValidatorId::coalition("v0"));
        assert_eq!(ValidatorId::organic("v0"), ValidatorId::organic("v0"));
    }

    #[test]
    fn displays_bare_name() {
        assert_eq!(ValidatorId::coalition("alice_validator_3").to_string(), "alice_validator_3");
    }
}
