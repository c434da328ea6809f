//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{CalibrationSpec, QuantSpec, TargetProfile};
use crate::fixed_mul::{MAX_MUL_BITS, MAX_SHIFT_LIMIT};
use crate::params::MAX_PARAM_BITS;

/// Validate a full `QuantSpec`
pub fn validate_spec(spec: &QuantSpec) -> Result<(), ValidationError> {
    validate_profile(&spec.target)?;
    validate_calibration(&spec.calibration)
}

/// Validate a target profile
///
/// Checks that every width and shift budget is one the deriver and the
/// fixed-point encoder accept.
pub fn validate_profile(profile: &TargetProfile) -> Result<(), ValidationError> {
    if profile.name.trim().is_empty() {
        return Err(ValidationError::EmptyProfileName);
    }

    if profile.activation_bits == 0 || profile.activation_bits > MAX_PARAM_BITS {
        return Err(ValidationError::InvalidActivationBits(profile.activation_bits));
    }

    if profile.mul_bits == 0 || profile.mul_bits > MAX_MUL_BITS {
        return Err(ValidationError::InvalidMulBits(profile.mul_bits));
    }

    if profile.max_shift > MAX_SHIFT_LIMIT {
        return Err(ValidationError::InvalidMaxShift(profile.max_shift));
    }

    Ok(())
}

/// Validate calibration source settings
pub fn validate_calibration(spec: &CalibrationSpec) -> Result<(), ValidationError> {
    if spec.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.batch_size));
    }

    if !spec.mean.is_finite() {
        return Err(ValidationError::InvalidMean(spec.mean));
    }

    // NaN fails the comparison as well
    if !(spec.std.is_finite() && spec.std > 0.0) {
        return Err(ValidationError::InvalidStd(spec.std));
    }

    Ok(())
}
