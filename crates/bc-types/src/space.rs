//! Quantization of a bounded real interval into fixed-length binary genotypes.
//!
//! A [`PrecisionSpace`] is built through exactly one of three factories
//! ([`PrecisionSpace::by_step_size`], [`PrecisionSpace::by_decimal_places`],
//! [`PrecisionSpace::by_bit_length`]). Starting from consistent inputs, all
//! three derive the same [`Precision`] triple.

use serde::{Deserialize, Serialize};

use crate::errors::SpaceError;

/// Longest supported genotype. Codes must stay inside a 32-bit signed range.
pub const MAX_BIT_LENGTH: u32 = 31;

/// Relative tolerance used when snapping floating point ratios onto integers.
const SNAP_TOLERANCE: f64 = 1e-9;

/// How finely the interval is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    /// Smallest decimal step, e.g. `0.001`.
    pub step_size: f64,
    /// Number of bits in the binary genotype.
    pub bit_length: u32,
    /// Decimal places used when rounding real values for display.
    pub decimal_places: u32,
}

/// The inclusive interval `[low, high]` together with its [`Precision`].
///
/// Immutable once built; every constructor validates `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecisionSpace {
    low: f64,
    high: f64,
    precision: Precision,
}

impl PrecisionSpace {
    /// Builds a space from a step size that must be a power of ten no larger
    /// than one (`1`, `0.1`, `0.01`, ...).
    pub fn by_step_size(step_size: f64, low: f64, high: f64) -> Result<Self, SpaceError> {
        check_range(low, high)?;

        if !(step_size.is_finite() && step_size > 0.0 && step_size <= 1.0) {
            return Err(SpaceError::InvalidStepSize { step: step_size });
        }
        let places = (-step_size.log10()).round();
        let decimal_places = places as u32;
        let normalized = pow10(-(decimal_places as i32));
        if (normalized - step_size).abs() > SNAP_TOLERANCE * step_size {
            return Err(SpaceError::InvalidStepSize { step: step_size });
        }

        let bit_length = bits_for(high - low, normalized);
        if bit_length > MAX_BIT_LENGTH {
            return Err(SpaceError::TooManySolutions {
                low,
                high,
                decimal_places,
            });
        }

        Ok(Self::new(
            low,
            high,
            Precision {
                step_size: normalized,
                bit_length,
                decimal_places,
            },
        ))
    }

    /// Builds a space from a number of decimal places.
    ///
    /// Fails when `(high - low) * 10^decimal_places + 1` solutions cannot be
    /// addressed within a 32-bit signed integer.
    pub fn by_decimal_places(decimal_places: u32, low: f64, high: f64) -> Result<Self, SpaceError> {
        check_range(low, high)?;

        let exponent = i32::try_from(decimal_places).unwrap_or(i32::MAX);
        let solutions = (high - low) * 10f64.powi(exponent) + 1.0;
        if !(solutions <= i32::MAX as f64) {
            return Err(SpaceError::TooManySolutions {
                low,
                high,
                decimal_places,
            });
        }

        let step_size = pow10(-exponent);
        let bit_length = bits_for(high - low, step_size);

        Ok(Self::new(
            low,
            high,
            Precision {
                step_size,
                bit_length,
                decimal_places,
            },
        ))
    }

    /// Builds a space from an explicit genotype length in `[1, 31]`.
    ///
    /// The derived decimal precision always rounds toward the coarser power
    /// of ten so every code is reproducible at that granularity. The step
    /// size is then reset to that power of ten.
    ///
    /// A zero-width interval has no spacing to derive from, so it gets the
    /// coarse precision `step_size = 1`, `decimal_places = 0` whatever the
    /// other factories would report for the same bounds.
    pub fn by_bit_length(bit_length: u32, low: f64, high: f64) -> Result<Self, SpaceError> {
        if !(1..=MAX_BIT_LENGTH).contains(&bit_length) {
            return Err(SpaceError::BitLengthOutOfRange { bits: bit_length });
        }
        check_range(low, high)?;

        let max_code = ((1u64 << bit_length) - 1) as f64;
        let raw_step = (high - low) / max_code;
        if raw_step > 1.0 {
            return Err(SpaceError::StepSizeTooLarge {
                low,
                high,
                bits: bit_length,
                step: raw_step,
            });
        }

        // A degenerate interval has no spacing at all; treat it as integral.
        let exponent = if raw_step > 0.0 {
            (raw_step.log10() - SNAP_TOLERANCE).ceil() as i32
        } else {
            0
        };

        Ok(Self::new(
            low,
            high,
            Precision {
                step_size: pow10(exponent),
                bit_length,
                decimal_places: exponent.unsigned_abs(),
            },
        ))
    }

    fn new(low: f64, high: f64, precision: Precision) -> Self {
        Self {
            low,
            high,
            precision,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn step_size(&self) -> f64 {
        self.precision.step_size
    }

    pub fn bit_length(&self) -> u32 {
        self.precision.bit_length
    }

    pub fn decimal_places(&self) -> u32 {
        self.precision.decimal_places
    }

    /// Largest integer code, `2^bit_length - 1`. It decodes to `high`.
    pub fn max_code(&self) -> u32 {
        ((1u64 << self.precision.bit_length) - 1) as u32
    }

    /// Real distance between two neighbouring codes.
    pub fn code_spacing(&self) -> f64 {
        self.width() / self.max_code() as f64
    }

    /// Rounds `x` to this space's decimal places.
    pub fn round(&self, x: f64) -> f64 {
        let scale = 10f64.powi(self.precision.decimal_places as i32);
        (x * scale).round() / scale
    }

    /// Whether `x` lies inside the inclusive interval.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.low && x <= self.high
    }
}

fn check_range(low: f64, high: f64) -> Result<(), SpaceError> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(SpaceError::InvalidRange { low, high })
    }
}

/// `10^exponent`, computed by division for negative exponents so that
/// `pow10(-3)` is the closest double to `0.001`.
fn pow10(exponent: i32) -> f64 {
    if exponent >= 0 {
        10f64.powi(exponent)
    } else {
        1.0 / 10f64.powi(exponent.saturating_neg())
    }
}

/// Bits needed to address every step of size `step` across `width`,
/// i.e. `ceil(log2(width / step + 1))`, never less than one.
fn bits_for(width: f64, step: f64) -> u32 {
    let ratio = width / step;
    let nearest = ratio.round();
    let steps = if (ratio - nearest).abs() <= SNAP_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };

    // Saturates for absurd ratios; callers bound the result.
    let solutions = (steps as u64).saturating_add(1);
    if solutions <= 1 {
        1
    } else {
        u64::BITS - (solutions - 1).leading_zeros()
    }
}
