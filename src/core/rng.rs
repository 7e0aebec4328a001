//! Target number generation.
//!
//! The engine draws each round's target through the `TargetSource` trait so
//! hosts and tests can inject their own source. `GameRng` is the default:
//!
//! - **Deterministic**: same seed produces the same sequence of targets
//! - **Seedable from entropy** for real play
//!
//! ```
//! use number_guess::core::{GameRng, TargetSource};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! let target = rng1.next_target(50);
//! assert!((1..=50).contains(&target));
//! assert_eq!(target, rng2.next_target(50));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies round targets.
pub trait TargetSource {
    /// Return an integer uniformly drawn from `[1, max]`.
    ///
    /// `max` is always at least 1.
    fn next_target(&mut self, max: u32) -> u32;
}

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG with a random seed.
    ///
    /// The seed is still recorded so a round can be reproduced from logs.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::new(seed)
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given inclusive range.
    pub fn gen_range(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }
}

impl TargetSource for GameRng {
    fn next_target(&mut self, max: u32) -> u32 {
        self.gen_range(1..=max.max(1))
    }
}

impl<T: TargetSource + ?Sized> TargetSource for Box<T> {
    fn next_target(&mut self, max: u32) -> u32 {
        (**self).next_target(max)
    }
}
