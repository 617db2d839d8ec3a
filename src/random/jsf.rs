//! Bob Jenkins' small fast generator (JSF).
//!
//! Four words of state, one word of output per step. Not cryptographic.
//! Cloning a generator forks the stream: the clone yields exactly the values
//! the source generator would have produced from that point on.

use rand::{Error, RngCore, SeedableRng};

const SEED_A: u64 = 0xf1ea5eed;
const DEFAULT_SEED: u64 = 0xdeadbeef;
const WARMUP_ROUNDS: usize = 20;

/// 32-bit output variant, 2-rotate schedule (27, 17)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jsf32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Jsf32 {
    pub fn new(seed: u32) -> Self {
        let mut rng = Self {
            a: SEED_A as u32,
            b: seed,
            c: seed,
            d: seed,
        };
        for _ in 0..WARMUP_ROUNDS {
            rng.step();
        }
        rng
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let e = self.a.wrapping_sub(self.b.rotate_left(27));
        self.a = self.b ^ self.c.rotate_left(17);
        self.b = self.c.wrapping_add(self.d);
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}

impl Default for Jsf32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED as u32)
    }
}

impl RngCore for Jsf32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Jsf32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// 64-bit output variant, 3-rotate schedule (7, 13, 37)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jsf64 {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl Jsf64 {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            a: SEED_A,
            b: seed,
            c: seed,
            d: seed,
        };
        for _ in 0..WARMUP_ROUNDS {
            rng.step();
        }
        rng
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let e = self.a.wrapping_sub(self.b.rotate_left(7));
        self.a = self.b ^ self.c.rotate_left(13);
        self.b = self.c.wrapping_add(self.d.rotate_left(37));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}

impl Default for Jsf64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for Jsf64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Jsf64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
