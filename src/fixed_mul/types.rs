//! Fixed-point multiplier type

use serde::{Deserialize, Serialize};

/// Real scalar encoded as `multiplier * 2^-shift`
///
/// Integer multiply-accumulate units evaluate `(input * multiplier) >> shift`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedMul {
    /// Scaled mantissa, bounded by `2^bits` in magnitude
    pub multiplier: f32,
    /// Right shift applied after multiplication
    pub shift: i8,
}

impl FixedMul {
    /// The real value this pair encodes.
    pub fn reconstruct(&self) -> f64 {
        f64::from(self.multiplier) * 2f64.powi(-i32::from(self.shift))
    }

    /// Multiplier rounded to the integer constant emitted into generated code.
    pub fn rounded_multiplier(&self) -> i64 {
        self.multiplier.round() as i64
    }

    /// Apply the encoding to an integer input the way the hardware does.
    ///
    /// Returns `None` for a negative shift, which no encoder output carries
    /// but a hand-built or deserialized pair can, or when the result does not
    /// fit `i64`.
    pub fn apply(&self, input: i32) -> Option<i64> {
        let shift = u32::try_from(self.shift).ok()?;
        let product = i128::from(input) * i128::from(self.rounded_multiplier());
        i64::try_from(product.checked_shr(shift)?).ok()
    }
}
