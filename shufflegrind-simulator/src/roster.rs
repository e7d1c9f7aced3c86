//! Roster construction for an experiment.
//!
//! Organic validators come first, coalition validators after them. The order
//! matters: it fixes the index each validator occupies in the initial draw.

use shufflegrind_core::{ProtocolError, ValidatorId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub organic: Vec<ValidatorId>,
    pub coalition: Vec<ValidatorId>,
}

impl Roster {
    /// Generates `<prefix>_<i>` identifiers for both sides.
    pub fn generate(
        organic_prefix: &str,
        organic_count: usize,
        coalition_prefix: &str,
        coalition_count: usize,
    ) -> Self {
        Self {
            organic: (0..organic_count)
                .map(|i| ValidatorId::organic(format!("{organic_prefix}_{i}")))
                .collect(),
            coalition: (0..coalition_count)
                .map(|i| ValidatorId::coalition(format!("{coalition_prefix}_{i}")))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.organic.len() + self.coalition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole roster, organic validators first.
    pub fn full(&self) -> Vec<ValidatorId> {
        self.organic
            .iter()
            .chain(self.coalition.iter())
            .cloned()
            .collect()
    }

    /// Pulls the first coalition validator out as the grinding reserve and
    /// returns the roster without it.
    ///
    /// At least one coalition validator must stay staked.
    pub fn split_reserve(mut self) -> Result<(Vec<ValidatorId>, ValidatorId), ProtocolError> {
        if self.coalition.len() < 2 {
            return Err(ProtocolError::invalid(format!(
                "coalition of {} cannot spare a reserve validator",
                self.coalition.len()
            )));
        }
        let reserve = self.coalition.remove(0);
        Ok((self.full(), reserve))
    }
}
