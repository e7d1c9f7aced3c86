// shufflegrind-simulator/src/lib.rs

/*!
# Shufflegrind Simulator

Deterministic driver for the producer selection state machine. A run feeds a
fixed number of rounds through a [`BlockStrategy`] and records who produced
every block; an experiment pairs an honest run with a grinding run on one
seeded random stream.

## Key Components:
- **Roster:** organic and coalition validator identifiers.
- **Strategies:** honest participation and reserve-validator grinding.
- **Observers:** read-only hooks for progress and verbose pacing.
- **Tally:** coalition wins over a recorded history.
- **Digest:** BLAKE3 fingerprint of a history for reproducibility checks.
*/

use serde::Serialize;
use tracing::info;

use shufflegrind_core::{ProtocolError, ProtocolState, SeededShuffle, ShuffleSource, ValidatorId};

pub mod digest;
pub mod experiment;
pub mod observer;
pub mod roster;
pub mod strategy;
pub mod tally;

pub use experiment::{run_experiment, ExperimentParams, ExperimentReport};
pub use observer::{NoopObserver, RoundObserver};
pub use roster::Roster;
pub use strategy::{BlockStrategy, GrindingStrategy, HonestStrategy, RoundAction};
pub use tally::CoalitionTally;

/// The Simulator advances one protocol state round by round under a strategy.
///
/// # Fields
/// - `state`: the protocol state being driven.
/// - `reshuffles`: how many rounds the strategy forced a fresh draw.
pub struct Simulator<S: ShuffleSource = SeededShuffle> {
    state: ProtocolState<S>,
    reshuffles: usize,
}

impl<S: ShuffleSource> Simulator<S> {
    /// Creates a new Simulator over `roster`, drawing from `source`.
    pub fn new(roster: Vec<ValidatorId>, source: S) -> Result<Self, ProtocolError> {
        Ok(Self {
            state: ProtocolState::new(roster, source)?,
            reshuffles: 0,
        })
    }

    /// Plays a single round: strategy hook, then block production.
    pub fn step<T, O>(&mut self, strategy: &mut T, observer: &mut O) -> Result<(), ProtocolError>
    where
        T: BlockStrategy,
        O: RoundObserver,
    {
        let round = self.state.rounds_produced();
        observer.on_pending(round, self.state.next_producer());

        if strategy.prepare_round(&mut self.state)? == RoundAction::Reshuffled {
            self.reshuffles += 1;
            observer.on_reshuffle(round, self.state.next_producer());
        }

        self.state.produce_block()?;
        if let Some(producer) = self.state.history().last() {
            observer.on_block(round, producer);
        }
        Ok(())
    }

    /// Runs the simulation for a given number of rounds.
    pub fn run<T, O>(
        &mut self,
        rounds: usize,
        strategy: &mut T,
        observer: &mut O,
    ) -> Result<(), ProtocolError>
    where
        T: BlockStrategy,
        O: RoundObserver,
    {
        if rounds == 0 {
            return Err(ProtocolError::invalid("round count must be positive"));
        }

        info!(
            strategy = strategy.name(),
            rounds,
            roster = self.state.active_validators().len(),
            "Starting run"
        );
        observer.on_run_start(strategy.name(), rounds);
        for _ in 0..rounds {
            self.step(strategy, observer)?;
        }
        observer.on_run_end(strategy.name(), rounds);
        Ok(())
    }

    pub fn state(&self) -> &ProtocolState<S> {
        &self.state
    }

    pub fn reshuffles(&self) -> usize {
        self.reshuffles
    }

    /// Ends the run, returning its outcome and the random source for reuse.
    pub fn finish(self, strategy: &str) -> (RunOutcome, S) {
        let reshuffles = self.reshuffles;
        let (history, source) = self.state.into_parts();
        let outcome = RunOutcome {
            strategy: strategy.to_string(),
            tally: CoalitionTally::from_history(&history),
            reshuffles,
            digest: digest::history_digest(&history),
            history,
        };
        info!(
            strategy,
            wins = outcome.tally.wins,
            rounds = outcome.tally.rounds,
            digest = %outcome.digest,
            "Run complete"
        );
        (outcome, source)
    }
}

/// Result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub strategy: String,
    pub tally: CoalitionTally,
    pub reshuffles: usize,
    pub digest: String,
    #[serde(skip)]
    pub history: Vec<ValidatorId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shufflegrind_core::shuffle::ScriptedShuffle;

    #[derive(Default)]
    struct Recorder {
        pending: Vec<usize>,
        reshuffles: Vec<usize>,
        blocks: Vec<String>,
        started: bool,
        ended: bool,
    }

    impl RoundObserver for Recorder {
        fn on_run_start(&mut self, _strategy: &str, _rounds: usize) {
            self.started = true;
        }

        fn on_pending(&mut self, round: usize, _producer: &ValidatorId) {
            self.pending.push(round);
        }

        fn on_reshuffle(&mut self, round: usize, _producer: &ValidatorId) {
            self.reshuffles.push(round);
        }

        fn on_block(&mut self, _round: usize, producer: &ValidatorId) {
            self.blocks.push(producer.to_string());
        }

        fn on_run_end(&mut self, _strategy: &str, _rounds: usize) {
            self.ended = true;
        }
    }

    fn roster() -> Vec<ValidatorId> {
        Roster::generate("o", 4, "a", 2).full()
    }

    #[test]
    fn test_simulator_runs() {
        let mut simulator = Simulator::new(roster(), SeededShuffle::new(42)).unwrap();
        simulator
            .run(50, &mut HonestStrategy, &mut NoopObserver)
            .unwrap();
        assert_eq!(simulator.state().rounds_produced(), 50);
        assert_eq!(simulator.reshuffles(), 0);

        let (outcome, source) = simulator.finish("honest");
        assert_eq!(outcome.tally.rounds, 50);
        assert_eq!(outcome.history.len(), 50);
        assert_eq!(source.draws(), 51);
    }

    #[test]
    fn zero_rounds_is_invalid() {
        let mut simulator = Simulator::new(roster(), SeededShuffle::new(42)).unwrap();
        let err = simulator
            .run(0, &mut HonestStrategy, &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidConfiguration(_)));
    }

    #[test]
    fn observer_sees_every_round() {
        // Draws: initial o_0, reserve lands on itself, post-block o_1, reshuffle to a_1.
        let source = ScriptedShuffle::new([0, 5, 1, 4]);
        let full = Roster::generate("o", 4, "a", 2);
        let (rest, reserve) = full.split_reserve().unwrap();
        let mut simulator = Simulator::new(rest, source).unwrap();
        let mut grinder = GrindingStrategy::new(reserve).unwrap();
        let mut recorder = Recorder::default();

        simulator.run(2, &mut grinder, &mut recorder).unwrap();

        assert!(recorder.started && recorder.ended);
        assert_eq!(recorder.pending, [0, 1]);
        assert_eq!(recorder.reshuffles, [0, 1]);
        assert_eq!(recorder.blocks, ["a_0", "a_1"]);
        assert_eq!(simulator.reshuffles(), 2);
        assert_eq!(simulator.state().active_validators().len(), 5);
    }

    #[test]
    fn roster_never_collapses_under_grinding() {
        let (rest, reserve) = Roster::generate("o", 1, "a", 2).split_reserve().unwrap();
        let mut simulator = Simulator::new(rest, SeededShuffle::new(3)).unwrap();
        let mut grinder = GrindingStrategy::new(reserve).unwrap();
        for _ in 0..1_000 {
            simulator.step(&mut grinder, &mut NoopObserver).unwrap();
            assert!(!simulator.state().active_validators().is_empty());
            assert_eq!(simulator.state().active_validators().len(), 2);
        }
    }

    proptest! {
        #[test]
        fn grinding_keeps_roster_size_and_is_reproducible(
            seed in any::<u64>(),
            organic in 1usize..10,
            coalition in 2usize..6,
            rounds in 1usize..200,
        ) {
            let run = || {
                let (rest, reserve) = Roster::generate("o", organic, "a", coalition)
                    .split_reserve()
                    .unwrap();
                let size = rest.len();
                let mut simulator = Simulator::new(rest, SeededShuffle::new(seed)).unwrap();
                let mut grinder = GrindingStrategy::new(reserve).unwrap();
                simulator.run(rounds, &mut grinder, &mut NoopObserver).unwrap();
                let after = simulator.state().active_validators().len();
                (size, after, simulator.finish("grinding").0)
            };

            let (size, after, first) = run();
            let (_, _, second) = run();
            prop_assert_eq!(size, after);
            prop_assert_eq!(first.tally.rounds, rounds);
            prop_assert!(first.reshuffles <= rounds);
            prop_assert_eq!(first.digest, second.digest);
        }
    }
}
