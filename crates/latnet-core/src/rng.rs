//! Seeded randomness for drawing generating values.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// `StdRng` that remembers the seed it was created from.
///
/// Random generating values are drawn from one substream per coordinate, so
/// the value of coordinate `j` does not depend on how many coordinates were
/// drawn before it.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Seeds a handle.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the seed this handle was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fresh handle for substream `id` of this handle's seed.
    pub fn substream(&self, id: u64) -> Self {
        Self::from_seed(derive_substream_seed(self.seed, id))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// SipHash-1-3 with zero keys over `(master_seed, id)`.
pub fn derive_substream_seed(master_seed: u64, id: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(id);
    hasher.finish()
}
