use thiserror::Error;

/// Main error type for the bitclimb system
#[derive(Error, Debug)]
pub enum BcError {
    #[error("Precision space error: {0}")]
    Space(#[from] SpaceError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures raised while constructing a [`crate::PrecisionSpace`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpaceError {
    #[error("Invalid range: [{low}, {high}], low must not exceed high")]
    InvalidRange { low: f64, high: f64 },

    #[error("Step size must be a positive fractional power of 10, got {step}")]
    InvalidStepSize { step: f64 },

    #[error("Genotype length must be in range [1, 31], got {bits}")]
    BitLengthOutOfRange { bits: u32 },

    #[error(
        "Range [{low}, {high}] cannot be fit into a {bits} bit genotype (step {step} exceeds 1), \
         consider a longer genotype"
    )]
    StepSizeTooLarge {
        low: f64,
        high: f64,
        bits: u32,
        step: f64,
    },

    #[error("Too many solutions for range [{low}, {high}] with {decimal_places} decimal places")]
    TooManySolutions {
        low: f64,
        high: f64,
        decimal_places: u32,
    },
}

/// Failures raised while decoding binary genotypes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Invalid binary string: {input:?}")]
    InvalidBinary { input: String },

    #[error("Genotype length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },
}

/// Result type alias for bitclimb operations
pub type BcResult<T> = Result<T, BcError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::BcError::Validation(format!($($arg)*))
    };
}
