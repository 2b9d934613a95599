//! Random number generation for dungeon generation
//!
//! Uses a seeded ChaCha RNG so that one seed always reproduces one dungeon.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream threaded through every generation step.
///
/// Not `Clone`: a generation run borrows the one stream mutably.
#[derive(Debug)]
pub struct Random {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Random {
    /// Create a new stream from the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new stream with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed used to create this stream
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a value in `0..n`
    ///
    /// Returns 0 if n is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns a value in `lo..=hi`
    ///
    /// Returns `lo` if the range is empty.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Pick an index with probability proportional to its weight
    ///
    /// Returns `None` when every weight is zero.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }

        let mut roll = self.below(total);
        for (i, &w) in weights.iter().enumerate() {
            if roll < w {
                return Some(i);
            }
            roll -= w;
        }
        None
    }
}
