//! ## shufflegrind-core::state
//! **Producer selection state machine**
//!
//! `ProtocolState` has a single `Ready` state. [`ProtocolState::produce_block`]
//! is the only transition that advances a round; adding a validator and
//! queueing a decommission are side entries that change what the next draw
//! and the next block see.
//!
//! Adding a validator always triggers a reshuffle. That coupling is what a
//! grinding adversary exploits: add a spare validator, get a fresh draw,
//! have it removed again right after the block.

use std::collections::HashSet;

use tracing::trace;

use crate::error::ProtocolError;
use crate::shuffle::{SeededShuffle, ShuffleSource};
use crate::validator::ValidatorId;

/// Roster, pending decommissions, tentative next producer and history.
#[derive(Debug, Clone)]
pub struct ProtocolState<S: ShuffleSource = SeededShuffle> {
    active_validators: Vec<ValidatorId>,
    decommission_queue: Vec<ValidatorId>,
    next_producer_index: usize,
    history: Vec<ValidatorId>,
    source: S,
}

impl<S: ShuffleSource> ProtocolState<S> {
    /// Creates the state from an initial roster and performs the first shuffle.
    ///
    /// Fails with `InvalidConfiguration` on an empty roster or a duplicated id.
    pub fn new(roster: Vec<ValidatorId>, source: S) -> Result<Self, ProtocolError> {
        if roster.is_empty() {
            return Err(ProtocolError::invalid("initial roster is empty"));
        }
        let mut seen = HashSet::with_capacity(roster.len());
        if let Some(dup) = roster.iter().find(|v| !seen.insert(*v)) {
            return Err(ProtocolError::invalid(format!(
                "validator {dup} appears twice in the initial roster"
            )));
        }

        let mut state = Self {
            active_validators: roster,
            decommission_queue: Vec::new(),
            next_producer_index: 0,
            history: Vec::new(),
            source,
        };
        state.shuffle()?;
        Ok(state)
    }

    /// Draws the next producer uniformly over the current roster.
    pub fn shuffle(&mut self) -> Result<(), ProtocolError> {
        let len = self.active_validators.len();
        if len == 0 {
            return Err(ProtocolError::EmptyRoster);
        }
        self.next_producer_index = self.source.draw_index(len);
        trace!(index = self.next_producer_index, roster = len, "shuffled");
        Ok(())
    }

    /// Queues a validator for removal after the next block.
    ///
    /// Rejected if applying the queue would leave no active validator.
    pub fn enqueue_decommission(&mut self, validator: ValidatorId) -> Result<(), ProtocolError> {
        let survivors = self
            .active_validators
            .iter()
            .filter(|v| **v != validator && !self.decommission_queue.contains(v))
            .count();
        if survivors == 0 {
            return Err(ProtocolError::invalid(format!(
                "decommissioning {validator} would empty the active roster"
            )));
        }
        self.decommission_queue.push(validator);
        Ok(())
    }

    /// Appends a validator to the roster and reshuffles.
    ///
    /// Rejected without a draw if the validator is already active.
    pub fn add_validator(&mut self, validator: ValidatorId) -> Result<(), ProtocolError> {
        if self.active_validators.contains(&validator) {
            return Err(ProtocolError::invalid(format!(
                "validator {validator} is already active"
            )));
        }
        self.active_validators.push(validator);
        self.shuffle()
    }

    /// Records this round's producer, applies pending decommissions, then
    /// draws the producer for the next round.
    ///
    /// On error nothing is mutated.
    pub fn produce_block(&mut self) -> Result<(), ProtocolError> {
        if self.active_validators.is_empty() {
            return Err(ProtocolError::EmptyRoster);
        }

        let remaining = if self.decommission_queue.is_empty() {
            None
        } else {
            let queued: HashSet<&ValidatorId> = self.decommission_queue.iter().collect();
            let kept: Vec<ValidatorId> = self
                .active_validators
                .iter()
                .filter(|v| !queued.contains(v))
                .cloned()
                .collect();
            if kept.is_empty() {
                return Err(ProtocolError::invalid(
                    "pending decommissions would empty the active roster",
                ));
            }
            Some(kept)
        };

        let producer = self.active_validators[self.next_producer_index].clone();
        trace!(round = self.history.len(), %producer, "block produced");
        self.history.push(producer);

        if let Some(kept) = remaining {
            self.active_validators = kept;
            self.decommission_queue.clear();
        }

        self.shuffle()
    }

    pub fn active_validators(&self) -> &[ValidatorId] {
        &self.active_validators
    }

    pub fn decommission_queue(&self) -> &[ValidatorId] {
        &self.decommission_queue
    }

    pub fn next_producer_index(&self) -> usize {
        self.next_producer_index
    }

    /// The validator tentatively selected for the upcoming block.
    pub fn next_producer(&self) -> &ValidatorId {
        &self.active_validators[self.next_producer_index]
    }

    pub fn history(&self) -> &[ValidatorId] {
        &self.history
    }

    pub fn rounds_produced(&self) -> usize {
        self.history.len()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the state, handing back the history and the random source.
    pub fn into_parts(self) -> (Vec<ValidatorId>, S) {
        (self.history, self.source)
    }
}
