//! Random number generator abstraction for determinism.
//!
//! Stanza lengths are the only random decision the engine makes. In
//! production the draw comes from [`SystemRng`]; tests inject a scripted
//! sequence so a stanza's length is known up front.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// `StdRng`-backed generator, seeded from the OS or from a fixed seed.
#[derive(Debug, Clone)]
pub struct SystemRng {
    inner: StdRng,
}

impl SystemRng {
    /// Creates a generator seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible generator from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.inner.random_range(min..=max)
    }
}
