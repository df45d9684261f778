//! Deterministic seed mixing and per-stage random streams for map generation.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Independent stream ids so one stage's draws never shift another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stream {
    Partition = 1,
    Templates = 2,
    Interest = 3,
    Spawns = 4,
}

pub(crate) struct StageRng {
    inner: ChaCha8Rng,
}

impl StageRng {
    pub(crate) fn new(seed: u64, stream: Stream) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, stream as u64)) }
    }

    /// Uniform in `min..=max`.
    pub(crate) fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = (max - min) as u64 + 1;
        min + (self.inner.next_u64() % span) as usize
    }

    /// Uniform in `0..len`; `len` must be non-zero.
    pub(crate) fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.range_inclusive(0, len - 1)
    }

    pub(crate) fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.inner.next_u64() % u64::from(n) == 0
    }
}

fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}
