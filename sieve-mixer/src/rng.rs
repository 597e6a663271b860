/// The default seed used by the sieve driver.
pub const DEFAULT_SEED: u64 = 21;

/// A Jenkins-style four-word PRNG.
///
/// Not cryptographic and not general-purpose — its only job is to
/// deterministically reproduce the same sequence of candidate mixer
/// programs and test trials for a given seed.
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

fn rotl64(x: u64, k: u32) -> u64 {
    if k == 0 || k == 64 {
        x.swap_bytes()
    } else {
        x.rotate_left(k)
    }
}

impl Rng {
    /// Seed the generator and discard 20 warmup outputs, matching the
    /// original `Random::Init`.
    pub fn seeded(seed: u64) -> Self {
        let mut r = Rng {
            a: 0xdeadbeef,
            b: seed,
            c: seed,
            d: seed,
        };
        for _ in 0..20 {
            r.next_u64();
        }
        r
    }

    pub fn next_u64(&mut self) -> u64 {
        let e = self.a.wrapping_sub(rotl64(self.b, 23));
        self.a = self.b ^ rotl64(self.c, 16);
        self.b = self.c.wrapping_add(rotl64(self.d, 11));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}
