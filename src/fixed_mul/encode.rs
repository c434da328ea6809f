//! Real scalar to bounded `(multiplier, shift)` encoding

use tracing::error;

use super::frexp::{frexp, ldexp};
use super::types::FixedMul;
use crate::error::{QuantError, Result};

/// Largest supported multiplier register width
pub const MAX_MUL_BITS: u32 = 32;

/// Largest shift that fits the `i8` shift field
pub const MAX_SHIFT_LIMIT: u8 = i8::MAX as u8;

/// Encode `value` as the highest-precision `multiplier * 2^-shift` whose
/// multiplier magnitude stays below `2^bits` and whose shift stays within
/// `max_shift`.
///
/// `bits` is `max_bits`, or `max_bits - 1` when `is_signed` reserves a sign
/// bit. Values above one spend the exponent on integer bits; values at or
/// below one spend it on fractional shift.
///
/// # Errors
/// * [`QuantError::NonFiniteValue`] for NaN or infinite `value`
/// * [`QuantError::InvalidBitWidth`] if `max_bits` is outside `1..=32`
/// * [`QuantError::InvalidShiftBudget`] if `max_shift > 127`
/// * [`QuantError::InvalidSignedValue`] if `is_signed` and `value < 0`
/// * [`QuantError::FixedMulOutOfBounds`] if no pair satisfies the bounds,
///   e.g. `value >= 2^bits`
pub fn encode_fixed_mul(
    value: f32,
    max_bits: u32,
    max_shift: u8,
    is_signed: bool,
) -> Result<FixedMul> {
    if !value.is_finite() {
        return Err(QuantError::NonFiniteValue { value });
    }
    if max_bits == 0 || max_bits > MAX_MUL_BITS {
        return Err(QuantError::InvalidBitWidth { bits: max_bits, min: 1, max: MAX_MUL_BITS });
    }
    if max_shift > MAX_SHIFT_LIMIT {
        return Err(QuantError::InvalidShiftBudget { max_shift, limit: MAX_SHIFT_LIMIT });
    }
    if is_signed && value < 0.0 {
        return Err(QuantError::InvalidSignedValue { value });
    }

    let bits = max_bits as i32 - i32::from(is_signed);
    let max_shift_i = i32::from(max_shift);

    let (multiplier, shift) = if value.abs() > 1.0 {
        let (m, e) = frexp(value);
        let shift = max_shift_i.min(bits - e);
        (ldexp(m, shift + e), shift)
    } else if value == 0.0 {
        (0.0, 0)
    } else {
        let (m, e) = frexp(value);
        let shift = (max_shift_i + e).min(bits);
        (ldexp(m, shift), shift - e)
    };

    check_bounds(value, bits, max_shift, multiplier, shift)?;
    Ok(FixedMul { multiplier, shift: shift as i8 })
}

fn check_bounds(value: f32, bits: i32, max_shift: u8, multiplier: f32, shift: i32) -> Result<()> {
    let magnitude_ok = f64::from(multiplier).abs() < 2f64.powi(bits);
    let shift_ok = (0..=i32::from(max_shift)).contains(&shift);
    let error = (f64::from(value) - f64::from(multiplier) * 2f64.powi(-shift)).abs();
    let precision_ok = error <= f64::from(f32::EPSILON);

    if magnitude_ok && shift_ok && precision_ok {
        return Ok(());
    }

    error!(value, bits, max_shift, multiplier, shift, error, "fixed-point encoding out of bounds");
    Err(QuantError::FixedMulOutOfBounds { value, bits, max_shift, multiplier, shift })
}
