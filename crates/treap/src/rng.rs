use rand::Rng;

const ZERO_SEED_REPLACEMENT: u64 = 0x5EED_BB57;

/// Xorshift source of node priorities.
///
/// Seed once and hand the same generator to every tree that should share
/// a priority stream. Tests pin the seed to reproduce exact tree shapes.
#[derive(Clone, Copy, Debug)]
pub struct PriorityRng {
    state: u64,
}

impl PriorityRng {
    pub fn with_seed(seed: u64) -> Self {
        // zero is a fixed point of xorshift
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    pub fn from_entropy() -> Self {
        Self::with_seed(rand::rng().random())
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn next_priority(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}
