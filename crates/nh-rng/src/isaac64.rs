//! ISAAC64 engine.
//!
//! Port of the ISAAC64 generator NetHack 3.6+ uses for its core RNG. The
//! engine only produces raw 64-bit words; the dice-shaped helpers and the
//! draw log live in [`crate::GameRng`].

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

const SZ_LOG: usize = 8;
const SZ: usize = 1 << SZ_LOG;
const HALF: usize = SZ / 2;

/// ISAAC64 state.
#[derive(Clone, Serialize, Deserialize)]
pub struct Isaac64 {
    /// Results buffer, consumed from the top down.
    r: Vec<u64>,
    /// Internal memory.
    m: Vec<u64>,
    a: u64,
    b: u64,
    c: u64,
    /// Unconsumed results left in `r`.
    n: usize,
    /// Raw words handed out so far.
    consumed: u64,
}

impl core::fmt::Debug for Isaac64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Isaac64")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("c", &self.c)
            .field("n", &self.n)
            .field("consumed", &self.consumed)
            .finish()
    }
}

impl Isaac64 {
    /// Seed from a u64, split into 8 little-endian bytes the way NetHack
    /// feeds its seed to `isaac64_init`.
    pub fn new(seed: u64) -> Self {
        Self::from_seed(seed.to_le_bytes())
    }

    fn with_seed_bytes(seed: &[u8]) -> Self {
        let mut ctx = Self {
            r: vec![0; SZ],
            m: vec![0; SZ],
            a: 0,
            b: 0,
            c: 0,
            n: 0,
            consumed: 0,
        };
        ctx.reseed(seed);
        ctx
    }

    /// XOR the seed into `r`, then scramble `m` with two mixing passes.
    fn reseed(&mut self, seed: &[u8]) {
        let seed = &seed[..seed.len().min(SZ * 8)];
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.r[i] ^= u64::from_le_bytes(word);
        }

        let mut x = [0x9E37_79B9_7F4A_7C13u64; 8];
        for _ in 0..4 {
            mix(&mut x);
        }
        for pass in 0..2 {
            for i in (0..SZ).step_by(8) {
                for j in 0..8 {
                    let src = if pass == 0 { self.r[i + j] } else { self.m[i + j] };
                    x[j] = x[j].wrapping_add(src);
                }
                mix(&mut x);
                self.m[i..i + 8].copy_from_slice(&x);
            }
        }

        self.update();
    }

    /// Refill the 256-word results buffer.
    fn update(&mut self) {
        self.c = self.c.wrapping_add(1);
        let mut a = self.a;
        let mut b = self.b.wrapping_add(self.c);

        for i in 0..SZ {
            let mixed = match i % 4 {
                0 => !(a ^ (a << 21)),
                1 => a ^ (a >> 5),
                2 => a ^ (a << 12),
                _ => a ^ (a >> 33),
            };
            let x = self.m[i];
            a = mixed.wrapping_add(self.m[(i + HALF) % SZ]);
            let y = self.m[lower_bits(x)].wrapping_add(a).wrapping_add(b);
            self.m[i] = y;
            b = self.m[upper_bits(y)].wrapping_add(x);
            self.r[i] = b;
        }

        self.a = a;
        self.b = b;
        self.n = SZ;
    }

    /// Next raw word, matching `isaac64_next_uint64`.
    #[inline]
    pub fn next_word(&mut self) -> u64 {
        if self.n == 0 {
            self.update();
        }
        self.n -= 1;
        self.consumed += 1;
        self.r[self.n]
    }

    /// Raw words consumed since seeding.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

fn mix(x: &mut [u64; 8]) {
    const SHIFT: [u32; 8] = [9, 9, 23, 15, 14, 20, 17, 14];

    for i in 0..8 {
        x[i] = x[i].wrapping_sub(x[(i + 4) & 7]);
        let t = x[(i + 7) & 7];
        if i % 2 == 0 {
            x[(i + 5) & 7] ^= t >> SHIFT[i];
        } else {
            x[(i + 5) & 7] ^= t << SHIFT[i];
        }
        x[(i + 7) & 7] = x[(i + 7) & 7].wrapping_add(x[i]);
    }
}

#[inline]
fn lower_bits(x: u64) -> usize {
    ((x >> 3) & (SZ as u64 - 1)) as usize
}

#[inline]
fn upper_bits(y: u64) -> usize {
    ((y >> (SZ_LOG + 3)) & (SZ as u64 - 1)) as usize
}

impl SeedableRng for Isaac64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::with_seed_bytes(&seed)
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

impl RngCore for Isaac64 {
    fn next_u32(&mut self) -> u32 {
        self.next_word() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Isaac64::new(12345);
        let mut b = Isaac64::new(12345);
        for _ in 0..1000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Isaac64::new(1);
        let mut b = Isaac64::new(2);
        let same = (0..64).filter(|_| a.next_word() == b.next_word()).count();
        assert!(same < 2);
    }

    #[test]
    fn test_refill_past_buffer() {
        let mut rng = Isaac64::new(7);
        for _ in 0..(SZ * 3 + 5) {
            rng.next_word();
        }
        assert_eq!(rng.consumed(), (SZ * 3 + 5) as u64);
    }

    #[test]
    fn test_seedable_rng_matches_new() {
        let mut a = Isaac64::seed_from_u64(42);
        let mut b = Isaac64::from_seed(42u64.to_le_bytes());
        let mut c = Isaac64::new(42);
        for _ in 0..300 {
            let v = c.next_word();
            assert_eq!(a.next_u64(), v);
            assert_eq!(b.next_u64(), v);
        }
    }

    #[test]
    fn test_fill_bytes_uses_whole_words() {
        let mut a = Isaac64::new(9);
        let mut b = Isaac64::new(9);
        let mut buf = [0u8; 12];
        a.fill_bytes(&mut buf);
        assert_eq!(&buf[..8], &b.next_word().to_le_bytes());
        assert_eq!(&buf[8..], &b.next_word().to_le_bytes()[..4]);
    }
}
