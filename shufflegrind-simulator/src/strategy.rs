//! Defines the BlockStrategy trait for driving rounds against the protocol state.

use tracing::debug;

use shufflegrind_core::{ProtocolError, ProtocolState, ShuffleSource, ValidatorId};

/// What a strategy did before the block of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    /// Left the pending draw untouched.
    Hold,
    /// Forced a fresh draw through a membership change.
    Reshuffled,
}

pub trait BlockStrategy {
    /// Short label used in logs, metrics and reports.
    fn name(&self) -> &'static str;

    /// Runs before `produce_block` in every round.
    fn prepare_round<S: ShuffleSource>(
        &mut self,
        state: &mut ProtocolState<S>,
    ) -> Result<RoundAction, ProtocolError>;
}

/// Follows the protocol: never touches the state between blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HonestStrategy;

impl BlockStrategy for HonestStrategy {
    fn name(&self) -> &'static str {
        "honest"
    }

    fn prepare_round<S: ShuffleSource>(
        &mut self,
        _state: &mut ProtocolState<S>,
    ) -> Result<RoundAction, ProtocolError> {
        Ok(RoundAction::Hold)
    }
}

/// Re-rolls every unfavourable draw by cycling a reserve validator in and out.
#[derive(Debug, Clone)]
pub struct GrindingStrategy {
    reserve: ValidatorId,
}

impl GrindingStrategy {
    /// The reserve must belong to the coalition and stay out of the initial roster.
    pub fn new(reserve: ValidatorId) -> Result<Self, ProtocolError> {
        if !reserve.is_coalition() {
            return Err(ProtocolError::invalid(format!(
                "reserve validator {reserve} is not a coalition member"
            )));
        }
        Ok(Self { reserve })
    }

    pub fn reserve(&self) -> &ValidatorId {
        &self.reserve
    }
}

impl BlockStrategy for GrindingStrategy {
    fn name(&self) -> &'static str {
        "grinding"
    }

    fn prepare_round<S: ShuffleSource>(
        &mut self,
        state: &mut ProtocolState<S>,
    ) -> Result<RoundAction, ProtocolError> {
        if state.next_producer().is_coalition() {
            return Ok(RoundAction::Hold);
        }

        state.add_validator(self.reserve.clone())?;
        state.enqueue_decommission(self.reserve.clone())?;
        debug!(
            round = state.rounds_produced(),
            producer = %state.next_producer(),
            "reserve validator triggered reshuffle"
        );
        Ok(RoundAction::Reshuffled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shufflegrind_core::shuffle::ScriptedShuffle;
    use shufflegrind_core::SeededShuffle;

    fn roster() -> Vec<ValidatorId> {
        vec![
            ValidatorId::organic("o_0"),
            ValidatorId::organic("o_1"),
            ValidatorId::coalition("a_1"),
        ]
    }

    #[test]
    fn honest_never_mutates() {
        let mut state = ProtocolState::new(roster(), SeededShuffle::new(5)).unwrap();
        let before = state.next_producer_index();
        let action = HonestStrategy.prepare_round(&mut state).unwrap();
        assert_eq!(action, RoundAction::Hold);
        assert_eq!(state.next_producer_index(), before);
        assert_eq!(state.active_validators().len(), 3);
    }

    #[test]
    fn grinder_holds_a_favourable_draw() {
        let mut state = ProtocolState::new(roster(), ScriptedShuffle::new([2])).unwrap();
        let mut grinder = GrindingStrategy::new(ValidatorId::coalition("a_0")).unwrap();
        assert_eq!(grinder.prepare_round(&mut state).unwrap(), RoundAction::Hold);
        assert_eq!(state.active_validators().len(), 3);
        assert!(state.decommission_queue().is_empty());
    }

    #[test]
    fn grinder_rerolls_an_unfavourable_draw() {
        let mut state = ProtocolState::new(roster(), ScriptedShuffle::new([0, 3, 1])).unwrap();
        let mut grinder = GrindingStrategy::new(ValidatorId::coalition("a_0")).unwrap();

        assert_eq!(
            grinder.prepare_round(&mut state).unwrap(),
            RoundAction::Reshuffled
        );
        assert_eq!(state.active_validators().len(), 4);
        assert_eq!(state.next_producer(), grinder.reserve());
        assert_eq!(state.decommission_queue(), &[ValidatorId::coalition("a_0")]);
        assert_eq!(state.source().ranges(), &[3, 4]);

        state.produce_block().unwrap();
        assert_eq!(state.history(), &[ValidatorId::coalition("a_0")]);
        assert_eq!(state.active_validators().len(), 3);
        assert!(!state.active_validators().contains(grinder.reserve()));
    }

    #[test]
    fn organic_reserve_is_rejected() {
        assert!(GrindingStrategy::new(ValidatorId::organic("o_9")).is_err());
    }
}
