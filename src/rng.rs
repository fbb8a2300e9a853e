//! Seedable RNG using FNV-1a hash and SplitMix64
//!
//! Each queue owns one generator, seeded once. A string seed goes through a
//! stable hash (not std's randomized hasher) so a fixed seed reproduces the
//! same tie-breaking across runs.

use rand::RngCore;

/// FNV-1a hash of a string to a u64 seed.
/// This is deterministic across runs (unlike std's DefaultHasher).
pub fn fnv1a64(s: &str) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in s.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

/// SplitMix64 generator used to break ties inside a priority bucket.
///
/// Implements [`RngCore`], so any [`rand::Rng`] helper (notably
/// `random_range`) works on it.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a string seed.
    pub fn new(seed: &str) -> Self {
        Self {
            state: fnv1a64(seed),
        }
    }

    /// Create a new RNG from a u64 seed.
    pub fn from_u64(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the thread-local entropy source. The seed is drawn once;
    /// every later value comes from this generator alone.
    pub fn from_entropy() -> Self {
        Self::from_u64(rand::random())
    }

    /// Generate the next u64 value (SplitMix64 algorithm).
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        // High bits of SplitMix64 output are the better mixed half.
        (SeededRng::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        SeededRng::next_u64(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = SeededRng::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
