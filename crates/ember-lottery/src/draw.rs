//! Draw-index sources.
//!
//! Winner selection never reads chain or OS entropy. The default
//! [`HashDraw`] derives each index from a fixed seed and the draw number,
//! so a replayed operation sequence reproduces the same winners. The
//! [`SeededRngDraw`] is an alternative for simulations that want a
//! stream-style source with the same reproducibility guarantee.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ember_core::traits::DrawSource;

/// Deterministic draw source: `BLAKE3(seed ‖ draw_number) mod bound`.
#[derive(Clone, Debug)]
pub struct HashDraw {
    seed: [u8; 32],
}

impl HashDraw {
    /// Create a source from an explicit 32-byte seed.
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed }
    }

    /// Derive the seed from a human-readable label.
    pub fn from_label(label: &str) -> Self {
        Self::new(blake3::hash(label.as_bytes()).into())
    }
}

impl Default for HashDraw {
    fn default() -> Self {
        Self::from_label("ember lottery draw v1")
    }
}

impl DrawSource for HashDraw {
    fn draw_index(&mut self, draw_number: u64, bound: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed);
        hasher.update(&draw_number.to_le_bytes());
        let digest = hasher.finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(word) % bound
    }
}

/// Seeded `StdRng`-backed draw source.
#[derive(Clone, Debug)]
pub struct SeededRngDraw {
    rng: StdRng,
}

impl SeededRngDraw {
    /// Create a source from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for SeededRngDraw {
    fn draw_index(&mut self, _draw_number: u64, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }
}
