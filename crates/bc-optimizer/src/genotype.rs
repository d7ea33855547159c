//! Fixed-length binary genotype.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use bc_types::{CodecError, PrecisionSpace, MAX_BIT_LENGTH};

use crate::codec;

/// A candidate solution: an integer code of exactly `bits` binary digits.
///
/// Bit positions are numbered the way the binary string reads, so position
/// `0` is the leftmost (most significant) character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genotype {
    code: u32,
    bits: u32,
}

impl Genotype {
    /// Wraps `code`, masking off anything above `bits` digits.
    ///
    /// `bits` must lie in `[1, MAX_BIT_LENGTH]`. Debug builds assert this;
    /// release builds clamp it into that range.
    pub fn new(code: u32, bits: u32) -> Self {
        let bits = checked_bits(bits);
        Self {
            code: code & mask(bits),
            bits,
        }
    }

    /// Draws a uniformly random genotype of `bits` digits, with the same
    /// bounds on `bits` as [`Genotype::new`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bits: u32) -> Self {
        let bits = checked_bits(bits);
        Self {
            code: rng.gen_range(0..=mask(bits)),
            bits,
        }
    }

    pub fn from_binary(binary: &str) -> Result<Self, CodecError> {
        if binary.len() > MAX_BIT_LENGTH as usize {
            return Err(CodecError::LengthMismatch {
                expected: MAX_BIT_LENGTH,
                actual: binary.len(),
            });
        }
        let code = codec::binary_to_int(binary)?;
        Ok(Self {
            code,
            bits: binary.len() as u32,
        })
    }

    pub fn from_real(x: f64, space: &PrecisionSpace) -> Self {
        Self::new(codec::real_to_int(x, space), space.bit_length())
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns a copy with the bit at string position `n` inverted.
    /// Positions past the end leave the genotype unchanged.
    pub fn flip_bit(&self, n: u32) -> Self {
        if n >= self.bits {
            return *self;
        }
        Self {
            code: self.code ^ (1 << (self.bits - 1 - n)),
            bits: self.bits,
        }
    }

    /// Every genotype at Hamming distance one, in bit position order.
    pub fn neighbours(&self) -> impl Iterator<Item = Genotype> + '_ {
        (0..self.bits).map(move |n| self.flip_bit(n))
    }

    pub fn to_binary(&self) -> String {
        codec::int_to_binary(self.code, self.bits)
    }

    pub fn to_real(&self, space: &PrecisionSpace) -> f64 {
        codec::int_to_real(self.code, space)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_binary())
    }
}

fn checked_bits(bits: u32) -> u32 {
    debug_assert!(
        (1..=MAX_BIT_LENGTH).contains(&bits),
        "genotype length {bits} outside [1, {MAX_BIT_LENGTH}]"
    );
    bits.clamp(1, MAX_BIT_LENGTH)
}

fn mask(bits: u32) -> u32 {
    ((1u64 << bits) - 1) as u32
}
