//! Deterministic RNG context for world generation
//!
//! One `GenRng` is created per `generate()` run and threaded explicitly
//! through every stage, so a level regenerates byte-identically from its
//! parameters alone. Never falls back to the host's default random source.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Explicit RNG state for one generation run
pub struct GenRng {
    inner: Xoshiro256StarStar,
}

impl GenRng {
    /// Create a context from a raw seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Derive the seed for a level so reloading regenerates the same world
    pub fn seed_for_level(
        environment_index: u32,
        colony_goal: u32,
        width: usize,
        height: usize,
    ) -> u64 {
        let packed = ((environment_index as u64) << 48)
            ^ ((colony_goal as u64) << 32)
            ^ ((width as u64) << 16)
            ^ height as u64;
        // splitmix64 finalizer spreads the packed parameters over all 64 bits
        let mut z = packed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Random u32
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.inner.gen()
    }

    /// Random f32 in [0.0, 1.0)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen()
    }

    /// Random integer in [min, max], inclusive on both ends
    #[inline]
    pub fn next_range(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        self.inner.gen_range(min..=max)
    }

    /// True with the given probability
    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }
}
