//! Random number generation for tower generation
//!
//! Uses a seeded ChaCha RNG so every tower can be replayed from its seed.

use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator random number source
///
/// Wraps ChaCha8Rng for reproducible generation.
#[derive(Debug, Clone)]
pub struct TowerRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl TowerRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `0..n`
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform float in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.sample(Standard)
    }

    /// Returns true when a uniform `[0, 1)` draw falls below `probability`.
    ///
    /// Always draws, so out-of-range probabilities saturate instead of
    /// panicking: `<= 0.0` never succeeds and `>= 1.0` always does.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len())])
        }
    }
}

impl Default for TowerRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
