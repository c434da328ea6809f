//! Range to affine quantization parameters

use tracing::{debug, error};

use super::types::QuantParam;
use crate::error::{QuantError, Result};
use crate::range::ValueRange;

/// Floor applied to the range span so near-constant tensors keep a finite scale
pub const MIN_RANGE_SPAN: f32 = 0.001;

/// Largest supported activation bit width; the bias must fit in `i32`
pub const MAX_PARAM_BITS: u32 = 31;

/// Derive asymmetric affine quantization parameters from an observed range.
///
/// The range is first widened to straddle zero, then its span is floored at
/// [`MIN_RANGE_SPAN`]. `scale = (2^bits - 1) / span` and
/// `bias = round(-min * scale)`.
///
/// # Errors
/// * [`QuantError::InvalidBitWidth`] if `bits` is outside `1..=31`
/// * [`QuantError::InvalidQuantizationState`] if the scale is not finite and
///   positive, or the bias is negative or non-finite (only possible for
///   non-finite input ranges)
pub fn derive(range: ValueRange, bits: u32) -> Result<QuantParam> {
    if bits == 0 || bits > MAX_PARAM_BITS {
        return Err(QuantError::InvalidBitWidth { bits, min: 1, max: MAX_PARAM_BITS });
    }

    let clamped = range.including_zero();

    // f64 keeps the span finite for any pair of finite f32 bounds
    let mut span = f64::from(clamped.max) - f64::from(clamped.min);
    if span < f64::from(MIN_RANGE_SPAN) {
        span = f64::from(MIN_RANGE_SPAN);
    }
    let qmax = ((1u64 << bits) - 1) as f64;
    let scale = (qmax / span) as f32;
    let mut bias = (-f64::from(clamped.min) * f64::from(scale)).round();
    // rounding `scale` to f32 can push an all-negative range one step past qmax
    if bias > qmax {
        bias = qmax;
    }

    // NaN fails both comparisons, so it is caught here too
    let scale_ok = scale.is_finite() && scale > 0.0;
    let bias_ok = bias >= 0.0 && bias.is_finite();
    if !(scale_ok && bias_ok) {
        error!(min = range.min, max = range.max, bits, scale, bias, "derived invalid quant param");
        return Err(QuantError::InvalidQuantizationState {
            min: range.min,
            max: range.max,
            bits,
            scale,
            bias: bias as f32,
        });
    }

    let param = QuantParam { bias: bias as i32, scale };
    debug!(range = %range, bits, scale, bias = param.bias, "derived quant param");
    Ok(param)
}
