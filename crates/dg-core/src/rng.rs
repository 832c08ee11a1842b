//! Seeded randomness for layout generation
//!
//! Every random choice the generator makes (floor variants, room sizes,
//! doorway ends) is drawn from one [`GenRng`], so a size and a seed pin
//! down the whole map.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Random source threaded through the generation stages
///
/// Serialises as the bare seed. Restoring one rewinds to the start of the
/// stream, which is what replaying a generation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct GenRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl From<u64> for GenRng {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}

impl From<GenRng> for u64 {
    fn from(rng: GenRng) -> u64 {
        rng.seed
    }
}

impl GenRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed drawn from the thread RNG, for maps nobody asked to reproduce
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this stream started from; reported with every generated map
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `0..n`, or 0 when `n` is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        match n {
            0 => 0,
            n => self.rng.gen_range(0..n),
        }
    }

    /// Room side length in `lo..hi`
    ///
    /// An empty range yields `lo`, so a pocket whose halved size falls
    /// below the minimum still gets a minimum-sized room.
    pub fn rand_int(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Fair coin flip, used to pick which end of a strip gets the doorway
    pub fn coin(&mut self) -> bool {
        self.rn2(2) == 1
    }

    /// Pick one tile variant, `None` for an empty set
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

impl Default for GenRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
