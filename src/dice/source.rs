//! Dice source shared by concurrent requests

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Randomizer, RngRandomizer};

/// Where a long-running process takes its dice from.
///
/// Unseeded sources use the thread-local RNG of whichever task rolls. A
/// seeded source keeps one RNG behind a lock so a given seed replays the
/// same sequence of rolls in request order.
#[derive(Debug)]
pub enum DiceSource {
    Thread,
    Seeded(Mutex<StdRng>),
}

impl DiceSource {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
            None => Self::Thread,
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    /// Run `f` with a randomizer drawn from this source
    pub fn with_randomizer<T>(&self, f: impl FnOnce(&mut dyn Randomizer) -> T) -> T {
        match self {
            Self::Thread => f(&mut RngRandomizer::thread()),
            Self::Seeded(rng) => {
                let mut guard = rng.lock();
                f(&mut RngRandomizer::new(&mut *guard))
            }
        }
    }
}
