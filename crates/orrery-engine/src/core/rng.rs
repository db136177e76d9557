//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, so a seeded scene places its bodies the same way every run.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// The seed is scrambled first: xorshift's early outputs from small
    /// seeds are tiny.
    pub fn new(seed: u64) -> Self {
        let state = splitmix64(seed);
        Rng {
            state: if state == 0 { 1 } else { state },
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

    /// Uniform value in [0, 1), built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform angle in [0, 360).
    pub fn next_degrees(&mut self) -> f64 {
        crate::orbit::wrap_degrees(self.next_f64() * 360.0)
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
