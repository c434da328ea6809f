//! Configuration validation
//!
//! Validates quantization settings before a calibration pass starts.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::{validate_calibration, validate_profile, validate_spec};
