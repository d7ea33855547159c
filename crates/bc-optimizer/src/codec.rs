//! Conversions between the three representations of a genotype: integer
//! code, fixed-length binary string, and real value.
//!
//! `low` always decodes from code `0` and `high` from code
//! `2^bit_length - 1`. Encoding a real rounds to the nearest code, so a
//! real survives a round trip only to within half a code spacing.

use bc_types::{CodecError, PrecisionSpace};

/// Parses a binary string of at most 32 digits as an unsigned code.
pub fn binary_to_int(binary: &str) -> Result<u32, CodecError> {
    if binary.is_empty() || !binary.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(CodecError::InvalidBinary {
            input: binary.to_string(),
        });
    }
    u32::from_str_radix(binary, 2).map_err(|_| CodecError::InvalidBinary {
        input: binary.to_string(),
    })
}

/// Zero-padded binary string of `code`, exactly `bit_length` characters
/// whenever `code` fits.
pub fn int_to_binary(code: u32, bit_length: u32) -> String {
    format!("{:0width$b}", code, width = bit_length as usize)
}

pub fn int_to_real(code: u32, space: &PrecisionSpace) -> f64 {
    let max_code = space.max_code();
    if code >= max_code {
        return space.high();
    }
    code as f64 * space.width() / max_code as f64 + space.low()
}

/// Nearest code for `x`. Values outside the interval clamp to the ends.
pub fn real_to_int(x: f64, space: &PrecisionSpace) -> u32 {
    let width = space.width();
    if width <= 0.0 {
        return 0;
    }
    let max_code = space.max_code() as f64;
    let code = ((x - space.low()) / width * max_code).round();
    code.clamp(0.0, max_code) as u32
}

pub fn real_to_binary(x: f64, space: &PrecisionSpace) -> String {
    int_to_binary(real_to_int(x, space), space.bit_length())
}

/// Decodes a binary genotype that must be exactly `bit_length` long.
pub fn binary_to_real(binary: &str, space: &PrecisionSpace) -> Result<f64, CodecError> {
    if binary.len() != space.bit_length() as usize {
        return Err(CodecError::LengthMismatch {
            expected: space.bit_length(),
            actual: binary.len(),
        });
    }
    Ok(int_to_real(binary_to_int(binary)?, space))
}
