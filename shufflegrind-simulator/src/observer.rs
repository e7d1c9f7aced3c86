//! Read-only hooks for presentation collaborators (progress, verbose pacing).
//!
//! Observers only ever see shared references, so they cannot influence the
//! history or any state invariant.

use shufflegrind_core::ValidatorId;

pub trait RoundObserver {
    /// A run of `rounds` blocks is about to start.
    fn on_run_start(&mut self, _strategy: &str, _rounds: usize) {}

    /// `producer` is tentatively selected for block `round`.
    fn on_pending(&mut self, _round: usize, _producer: &ValidatorId) {}

    /// The strategy forced a reshuffle; `producer` is the new tentative pick.
    fn on_reshuffle(&mut self, _round: usize, _producer: &ValidatorId) {}

    /// Block `round` was produced by `producer`.
    fn on_block(&mut self, _round: usize, _producer: &ValidatorId) {}

    /// The run finished after `rounds` blocks.
    fn on_run_end(&mut self, _strategy: &str, _rounds: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {}

impl<O: RoundObserver + ?Sized> RoundObserver for &mut O {
    fn on_run_start(&mut self, strategy: &str, rounds: usize) {
        (**self).on_run_start(strategy, rounds)
    }

    fn on_pending(&mut self, round: usize, producer: &ValidatorId) {
        (**self).on_pending(round, producer)
    }

    fn on_reshuffle(&mut self, round: usize, producer: &ValidatorId) {
        (**self).on_reshuffle(round, producer)
    }

    fn on_block(&mut self, round: usize, producer: &ValidatorId) {
        (**self).on_block(round, producer)
    }

    fn on_run_end(&mut self, strategy: &str, rounds: usize) {
        (**self).on_run_end(strategy, rounds)
    }
}
