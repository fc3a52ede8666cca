//! Seedable xorshift64 generator used for particle colors.
//! Deterministic per seed, so a session replays identically in tests.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    /// An upper bound of zero yields zero.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// A color channel quantized to `steps` levels in [0, 1).
    pub fn next_channel(&mut self, steps: u32) -> f32 {
        if steps == 0 {
            return 0.0;
        }
        self.next_int(steps) as f32 / steps as f32
    }
}
