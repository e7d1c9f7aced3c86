//! ## shufflegrind-core::shuffle
//! **Random sources for producer selection**
//!
//! A shuffle is a uniform re-draw of the next producer index over the current
//! roster. The source is an explicit object owned by the protocol state, so a
//! run is reproducible from its seed alone and the same stream can be carried
//! from one phase of an experiment into the next.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait for producer-selection draws.
pub trait ShuffleSource {
    /// Draws an index uniformly from `0..len`. Callers guarantee `len > 0`.
    fn draw_index(&mut self, len: usize) -> usize;
}

/// Seeded uniform draws backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    seed: u64,
    rng: StdRng,
    draws: u64,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws taken from the stream so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl ShuffleSource for SeededShuffle {
    fn draw_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "draw over an empty range");
        self.draws += 1;
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed sequence of values, wrapping each into range.
///
/// Records the range of every draw so tests can check what a shuffle was
/// computed over.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Default)]
pub struct ScriptedShuffle {
    script: Vec<usize>,
    cursor: usize,
    ranges: Vec<usize>,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedShuffle {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            ranges: Vec::new(),
        }
    }

    /// Range (`len`) requested by each draw, in order.
    pub fn ranges(&self) -> &[usize] {
        &self.ranges
    }
}

#[cfg(any(test, feature = "test-util"))]
impl ShuffleSource for ScriptedShuffle {
    fn draw_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "draw over an empty range");
        self.ranges.push(len);
        let value = if self.script.is_empty() {
            0
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        value % len
    }
}

impl<S: ShuffleSource + ?Sized> ShuffleSource for &mut S {
    fn draw_index(&mut self, len: usize) -> usize {
        (**self).draw_index(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = SeededShuffle::new(42);
        let mut b = SeededShuffle::new(42);
        let left: Vec<usize> = (0..64).map(|_| a.draw_index(100)).collect();
        let right: Vec<usize> = (0..64).map(|_| b.draw_index(100)).collect();
        assert_eq!(left, right);
        assert_eq!(a.draws(), 64);
    }

    #[test]
    fn seeded_draws_stay_in_range() {
        let mut source = SeededShuffle::new(7);
        for len in 1..50 {
            for _ in 0..20 {
                assert!(source.draw_index(len) < len);
            }
        }
    }

    #[test]
    fn seeded_draws_are_roughly_uniform() {
        let mut source = SeededShuffle::new(1);
        let mut buckets = [0usize; 4];
        for _ in 0..40_000 {
            buckets[source.draw_index(4)] += 1;
        }
        for count in buckets {
            // Expect 10_000 per bucket.
            assert!((9_500..10_500).contains(&count), "bucket count {count}");
        }
    }

    #[test]
    fn scripted_wraps_and_records_ranges() {
        let mut source = ScriptedShuffle::new([5, 1]);
        assert_eq!(source.draw_index(3), 2);
        assert_eq!(source.draw_index(3), 1);
        assert_eq!(source.draw_index(4), 1);
        assert_eq!(source.ranges(), &[3, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "draw over an empty range")]
    #[cfg(debug_assertions)]
    fn scripted_rejects_empty_range() {
        ScriptedShuffle::new([1]).draw_index(0);
    }
}
