//! Deterministic random source for the fire simulation.
//!
//! A 624-word twisted generalized feedback shift register (the classic
//! 32-bit Mersenne Twister layout). The fire's visual pattern is a pure
//! function of the seed and of the order in which draws are made, so every
//! helper here maps raw words to numbers in a fixed, documented way.
//!
//! # Float construction
//!
//! Floats are built by forcing the exponent of an IEEE-754 single to 0 and
//! filling the mantissa with the low 23 bits of a raw word. That yields a
//! value in `[1.0, 2.0)`; subtracting 1.0 lands in `[0.0, 1.0)` exactly,
//! which is then scaled by the caller's bound.

use rand::{RngCore, SeedableRng};

/// Seed used when the host does not provide one.
pub const DEFAULT_SEED: u32 = 0xFEA4_BEE5;

/// Number of words in the generator state.
const STATE_LEN: usize = 624;

/// Offset of the word mixed into each twisted entry.
const SHIFT_LEN: usize = 397;

/// Multiplier of the linear-congruential seed expansion.
const SEED_MULTIPLIER: u32 = 1_812_433_253;

/// Magic constant applied when the low bit of the neighbour is set.
const TWIST_MAGIC: u32 = 0x9908_B0DF;

const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// Bit pattern of `1.0_f32`; or-ed with 23 mantissa bits gives `[1.0, 2.0)`.
const UNIT_EXPONENT: u32 = 0x3F80_0000;
const MANTISSA_MASK: u32 = 0x007F_FFFF;

/// Seedable, reproducible pseudo-random source.
///
/// Not thread-safe and not meant to be shared: one simulation owns one
/// generator and draws from it in a fixed order every tick.
#[derive(Clone)]
pub struct FireRng {
    state: [u32; STATE_LEN],
    cursor: usize,
}

impl FireRng {
    /// Create a generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut rng = Self {
            state: [0; STATE_LEN],
            cursor: STATE_LEN,
        };
        rng.seed(seed);
        rng
    }

    /// Reset the internal state as a deterministic function of `value`.
    ///
    /// The state is filled by linear-congruential expansion and marked for a
    /// full regeneration on the next draw.
    pub fn seed(&mut self, value: u32) {
        self.state[0] = value;
        for i in 1..STATE_LEN {
            let prev = self.state[i - 1];
            self.state[i] = SEED_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.cursor = STATE_LEN;
    }

    /// Next tempered 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        if self.cursor == STATE_LEN {
            self.regenerate();
        }

        let mut x = self.state[self.cursor];
        self.cursor += 1;

        x ^= x >> 11;
        x ^= (x << 7) & 0x9D2C_5680;
        x ^= (x << 15) & 0xEFC6_0000;
        x ^ (x >> 18)
    }

    /// Next raw word reinterpreted as a signed integer.
    pub fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }

    /// Float in `[0, max)`. `max` itself is never returned for `max > 0`.
    pub fn next_float(&mut self, max: f32) -> f32 {
        let bits = UNIT_EXPONENT | (self.next_u32() & MANTISSA_MASK);
        (f32::from_bits(bits) - 1.0) * max
    }

    /// Float in `[min, max)`.
    pub fn next_float_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_float(max - min)
    }

    /// Integer in `[0, max]`, inclusive.
    ///
    /// Computed as a plain modulo, so small values are slightly favoured.
    /// The bias is part of the reproducible sequence and must stay.
    pub fn next_int(&mut self, max: u32) -> u32 {
        let raw = self.next_u32();
        match max.checked_add(1) {
            Some(modulus) => raw % modulus,
            None => raw,
        }
    }

    /// Integer in `[min, max]`, inclusive.
    pub fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        let span = max.wrapping_sub(min) as u32;
        min.wrapping_add(self.next_int(span) as i32)
    }

    /// Twist all 624 words in place.
    fn regenerate(&mut self) {
        let s = &mut self.state;
        for i in 0..STATE_LEN - SHIFT_LEN {
            s[i] = s[i + SHIFT_LEN] ^ twiddle(s[i], s[i + 1]);
        }
        for i in STATE_LEN - SHIFT_LEN..STATE_LEN - 1 {
            s[i] = s[i + SHIFT_LEN - STATE_LEN] ^ twiddle(s[i], s[i + 1]);
        }
        s[STATE_LEN - 1] = s[SHIFT_LEN - 1] ^ twiddle(s[STATE_LEN - 1], s[0]);
        self.cursor = 0;
    }
}

/// Combine the high bit of `u` with the low 31 bits of `v`, shift, and fold
/// in the magic constant when `v` is odd.
#[inline]
fn twiddle(u: u32, v: u32) -> u32 {
    (((u & UPPER_MASK) | (v & LOWER_MASK)) >> 1) ^ ((v & 1) * TWIST_MAGIC)
}

impl Default for FireRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl std::fmt::Debug for FireRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireRng")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl RngCore for FireRng {
    fn next_u32(&mut self) -> u32 {
        FireRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(FireRng::next_u32(self));
        let high = u64::from(FireRng::next_u32(self));
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let word = FireRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}

impl SeedableRng for FireRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
