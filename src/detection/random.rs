use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in [0, 1).
///
/// The mock detector takes all of its randomness through this trait so tests
/// (and the `--seed` flag) can substitute deterministic sequences for the
/// global thread RNG.
pub trait RandomSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Draws from the thread-local RNG. The default source.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self) -> f64 {
        rand::rng().random()
    }
}

/// Deterministic source seeded from a u64. Equal seeds yield equal draws.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .random()
    }
}
