//! Affine quantization parameter derivation
//!
//! Turns a merged calibration range and a target bit width into the
//! `(bias, scale)` pair code generation uses to map real values onto
//! `[0, 2^bits - 1]`.

mod derive;
mod types;


pub use derive::{derive, MAX_PARAM_BITS, MIN_RANGE_SPAN};
pub use types::QuantParam;
