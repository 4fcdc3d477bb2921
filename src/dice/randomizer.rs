//! Randomizer implementations
//!
//! Handlers never touch an RNG directly. They take `&mut dyn Randomizer`, so
//! the server, the CLI and the tests can each decide where dice come from.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;
use tracing::warn;

/// Source of die rolls
pub trait Randomizer {
    /// Roll a single die with `sides` faces, returning a value in `1..=sides`
    fn roll_once(&mut self, sides: u32) -> u32;

    /// Roll `count` dice with `sides` faces, in roll order
    fn roll_many(&mut self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll_once(sides)).collect()
    }
}

/// Randomizer backed by any `rand` RNG
#[derive(Debug, Clone)]
pub struct RngRandomizer<R> {
    rng: R,
}

impl<R: Rng> RngRandomizer<R> {
    /// Wrap an RNG
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRandomizer<rand::rngs::ThreadRng> {
    /// Randomizer on the thread-local RNG
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> Randomizer for RngRandomizer<R> {
    fn roll_once(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.random_range(1..=sides)
    }
}

/// Randomizer that replays a predetermined sequence of values.
///
/// Values are returned as given, without checking them against the number of
/// sides. Once the sequence runs out every further roll yields 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomizer {
    values: VecDeque<u32>,
}

impl ScriptedRandomizer {
    /// Create a randomizer that will return `values` in order
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of values not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Randomizer for ScriptedRandomizer {
    fn roll_once(&mut self, sides: u32) -> u32 {
        match self.values.pop_front() {
            Some(value) => value,
            None => {
                warn!(sides, "scripted randomizer exhausted, returning 1");
                1
            }
        }
    }
}

/// One die reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rand {
    pub sides: u32,
    pub value: u32,
}

/// Wraps another randomizer and remembers every die it hands out
pub struct DiceRecorder<'a> {
    inner: &'a mut dyn Randomizer,
    rands: Vec<Rand>,
}

impl<'a> DiceRecorder<'a> {
    /// Start recording rolls made through `inner`
    pub fn new(inner: &'a mut dyn Randomizer) -> Self {
        Self {
            inner,
            rands: Vec::new(),
        }
    }

    /// Finish recording
    pub fn into_rands(self) -> Vec<Rand> {
        self.rands
    }
}

impl Randomizer for DiceRecorder<'_> {
    fn roll_once(&mut self, sides: u32) -> u32 {
        let value = self.inner.roll_once(sides);
        self.rands.push(Rand { sides, value });
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rng_roll_bounds() {
        let mut dice = RngRandomizer::new(StdRng::seed_from_u64(7));

        for _ in 0..500 {
            let value = dice.roll_once(6);
            assert!((1..=6).contains(&value), "roll {} outside 1..=6", value);
        }
    }

    #[test]
    fn test_rng_seed_is_reproducible() {
        let mut a = RngRandomizer::new(StdRng::seed_from_u64(42));
        let mut b = RngRandomizer::new(StdRng::seed_from_u64(42));

        assert_eq!(a.roll_many(10, 6), b.roll_many(10, 6));
    }

    #[test]
    fn test_roll_many_count() {
        let mut dice = RngRandomizer::new(StdRng::seed_from_u64(1));
        assert_eq!(dice.roll_many(5, 6).len(), 5);
        assert!(dice.roll_many(0, 6).is_empty());
    }

    #[test]
    fn test_zero_sided_die() {
        let mut dice = RngRandomizer::new(StdRng::seed_from_u64(1));
        assert_eq!(dice.roll_once(0), 0);
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut dice = ScriptedRandomizer::new([3, 6, 1]);
        assert_eq!(dice.roll_many(2, 6), vec![3, 6]);
        assert_eq!(dice.remaining(), 1);
        assert_eq!(dice.roll_once(6), 1);
    }

    #[test]
    fn test_scripted_exhausted_returns_one() {
        let mut dice = ScriptedRandomizer::new([]);
        assert_eq!(dice.roll_once(6), 1);
        assert_eq!(dice.roll_once(20), 1);
    }

    #[test]
    fn test_recorder_tracks_rolls() {
        let mut inner = ScriptedRandomizer::new([2, 5, 4]);
        let mut recorder = DiceRecorder::new(&mut inner);

        assert_eq!(recorder.roll_once(6), 2);
        assert_eq!(recorder.roll_many(2, 6), vec![5, 4]);

        let rands = recorder.into_rands();
        assert_eq!(
            rands,
            vec![
                Rand { sides: 6, value: 2 },
                Rand { sides: 6, value: 5 },
                Rand { sides: 6, value: 4 },
            ]
        );
    }
}
