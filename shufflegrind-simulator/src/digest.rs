//! BLAKE3 fingerprint of a producer history.
//!
//! Two runs with the same seed, roster and round count must yield the same
//! digest; the CLI can check a run against a previously recorded value.

use blake3::Hasher;

use shufflegrind_core::ValidatorId;

pub fn history_digest(history: &[ValidatorId]) -> String {
    let mut hasher = Hasher::new();
    for producer in history {
        hasher.update(producer.name().as_bytes());
        hasher.update(&[0]);
    }
    hex::encode(hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_depends_on_order() {
        let a = ValidatorId::organic("a");
        let b = ValidatorId::organic("b");
        assert_ne!(
            history_digest(&[a.clone(), b.clone()]),
            history_digest(&[b, a])
        );
    }

    #[test]
    fn separator_prevents_concatenation_collisions() {
        let joined = [ValidatorId::organic("ab")];
        let split = [ValidatorId::organic("a"), ValidatorId::organic("b")];
        assert_ne!(history_digest(&joined), history_digest(&split));
    }

    #[test]
    fn digest_is_hex_encoded() {
        let digest = history_digest(&[]);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
