//! Fixed-point multiplier encoding
//!
//! Converts a real scalar (e.g. a layer's combined requantization scale) into
//! an integer-friendly `(multiplier, shift)` pair for multiply-shift hardware.
//! Pure and stateless; safe to call from any thread.

mod encode;
mod frexp;
mod types;


pub use encode::{encode_fixed_mul, MAX_MUL_BITS, MAX_SHIFT_LIMIT};
pub use frexp::frexp;
pub use types::FixedMul;
