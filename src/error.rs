//! Error types for calibration and quantization
//!
//! Invariant failures in the deriver and the fixed-point encoder are reported
//! as [`QuantError::is_internal`] errors carrying the full input context, so a
//! broken invariant can be diagnosed from the message alone.

use thiserror::Error;

use crate::config::ValidationError;
use crate::range::TensorId;

/// Quantization errors
#[derive(Debug, Error)]
pub enum QuantError {
    #[error("Empty sample set for {id}: batch contains no comparable values")]
    EmptySampleSet { id: TensorId },

    #[error("No comparable samples: all {count} values are NaN or the set is empty")]
    NoSamples { count: usize },

    #[error("Unknown tensor: {0} has no recorded range")]
    UnknownTensor(TensorId),

    #[error("Invalid signed value: {value} (signed fixed-point encoding requires value >= 0)")]
    InvalidSignedValue { value: f32 },

    #[error("Non-finite value: {value} cannot be encoded as a fixed-point multiplier")]
    NonFiniteValue { value: f32 },

    #[error("Invalid bit width: {bits} (must be in {min}..={max})")]
    InvalidBitWidth { bits: u32, min: u32, max: u32 },

    #[error("Invalid shift budget: {max_shift} (must be <= {limit})")]
    InvalidShiftBudget { max_shift: u8, limit: u8 },

    #[error(
        "Invalid quantization state: range [{min}, {max}] at {bits} bits produced \
         scale {scale} bias {bias}"
    )]
    InvalidQuantizationState { min: f32, max: f32, bits: u32, scale: f32, bias: f32 },

    #[error(
        "Fixed-point encoding out of bounds: value={value} bits={bits} max_shift={max_shift} \
         produced multiplier={multiplier} shift={shift}"
    )]
    FixedMulOutOfBounds { value: f32, bits: i32, max_shift: u8, multiplier: f32, shift: i32 },

    #[error("Invalid calibration source: {0}")]
    InvalidSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

impl QuantError {
    /// Whether this error signals a broken algorithmic invariant rather than
    /// bad input or configuration.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InvalidQuantizationState { .. } | Self::FixedMulOutOfBounds { .. })
    }
}

/// Result type for quantization operations
pub type Result<T> = std::result::Result<T, QuantError>;
