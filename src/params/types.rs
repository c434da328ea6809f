//! Affine quantization parameter type

use serde::{Deserialize, Serialize};

use super::derive::MAX_PARAM_BITS;
use crate::error::{QuantError, Result};

/// Affine quantization parameters: `q = round(real * scale) + bias`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantParam {
    /// Integer offset at which real zero lands (always >= 0)
    pub bias: i32,
    /// Multiplier from real units to quantized steps
    pub scale: f32,
}

impl QuantParam {
    /// Quantize a real value, saturating to `[0, 2^bits - 1]`.
    ///
    /// NaN maps to the bias, i.e. to real zero.
    ///
    /// # Errors
    /// [`QuantError::InvalidBitWidth`] if `bits` is outside `1..=31`.
    pub fn quantize(&self, real: f32, bits: u32) -> Result<i64> {
        if bits == 0 || bits > MAX_PARAM_BITS {
            return Err(QuantError::InvalidBitWidth { bits, min: 1, max: MAX_PARAM_BITS });
        }

        let qmax = (1i64 << bits) - 1;
        let steps = (f64::from(real) * f64::from(self.scale)).round();
        if steps.is_nan() {
            return Ok(i64::from(self.bias).clamp(0, qmax));
        }

        // |q| <= 2^31 after the clamp, so the cast below is exact
        let q = (steps + f64::from(self.bias)).clamp(0.0, qmax as f64);
        Ok(q as i64)
    }

    /// Map a quantized value back to real units.
    pub fn dequantize(&self, q: i64) -> f32 {
        (q - i64::from(self.bias)) as f32 / self.scale
    }

    /// Real value covered by one quantization step.
    pub fn step(&self) -> f32 {
        1.0 / self.scale
    }
}
