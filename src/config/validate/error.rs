//! Validation error types
//!
//! Defines all validation error variants for quantization settings.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Target profile name cannot be empty")]
    EmptyProfileName,

    #[error("Invalid activation bits: {0} (must be in 1..=31)")]
    InvalidActivationBits(u32),

    #[error("Invalid multiplier bits: {0} (must be in 1..=32)")]
    InvalidMulBits(u32),

    #[error("Invalid max shift: {0} (must be <= 127)")]
    InvalidMaxShift(u8),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid normalization mean: {0} (must be finite)")]
    InvalidMean(f32),

    #[error("Invalid normalization std: {0} (must be finite and > 0.0)")]
    InvalidStd(f32),
}
