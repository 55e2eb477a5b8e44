use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;

/// Seedable random number generator used to fill logical memory.
///
/// Wraps StdRng and remembers its seed, so a run can be reproduced from the
/// seed reported in logs and snapshots.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Rng {
    seed: u64,
    #[serde(skip_serializing)]
    rng: StdRng,
}

impl Rng {
    /// Creates a new RNG from a seed value.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed value for deterministic content generation
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a new RNG from a random seed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Returns the seed this RNG was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for Rng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }
}

impl Clone for Rng {
    fn clone(&self) -> Self {
        Self::from_seed(self.seed)
    }
}
