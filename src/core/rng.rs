//! Deterministic random number generation for move selection.
//!
//! Every randomized decision in a race draws from a `RaceRng` owned by the
//! deciding driver, so a seed fully determines a race.
//!
//! ```
//! use grid_duel::core::RaceRng;
//!
//! let mut a = RaceRng::new(7);
//! let mut b = RaceRng::new(7);
//! assert_eq!(a.gen_index(10), b.gen_index(10));
//!
//! // Forks are independent but reproducible streams
//! let mut fa = a.fork();
//! let mut fb = b.fork();
//! assert_eq!(fa.gen_index(1000), fb.gen_index(1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment used to spread fork seeds.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded RNG injected into drivers.
///
/// Uses ChaCha8 so sequences are stable across platforms.
#[derive(Clone, Debug)]
pub struct RaceRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl RaceRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream, e.g. one per seat.
    ///
    /// The n-th fork of a given seed is always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(FORK_STRIDE));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..len`.
    ///
    /// `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        Some(&slice[self.gen_index(slice.len())])
    }
}
