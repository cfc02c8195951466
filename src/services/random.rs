use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Where a selection gets its randomness from.
///
/// Seeded streams are reproducible for this crate only: a seed will not
/// reproduce selections made by other implementations of the tile selector,
/// since those use a different generator and draw order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RandomSource {
    /// Call-scoped ChaCha8 stream from a shareable seed
    Seeded(u64),
    /// Call-scoped generator seeded from OS entropy
    #[default]
    Entropy,
    /// The thread-local process generator. Opt-in only.
    Shared,
}

impl RandomSource {
    /// `Seeded` when a seed is present, otherwise `Entropy`
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => RandomSource::Seeded(seed),
            None => RandomSource::Entropy,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match self {
            RandomSource::Seeded(seed) => Some(*seed),
            _ => None,
        }
    }

    pub fn into_rng(self) -> Box<dyn RngCore> {
        match self {
            RandomSource::Seeded(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
            RandomSource::Entropy => Box::new(ChaCha8Rng::from_entropy()),
            RandomSource::Shared => Box::new(rand::thread_rng()),
        }
    }
}
