//! Quantization configuration
//!
//! Target hardware profiles and calibration settings, loadable from YAML:
//!
//! ```yaml
//! target:
//!   name: int8
//!   activation_bits: 8
//!   mul_bits: 32
//!   max_shift: 31
//! calibration:
//!   batch_size: 16
//!   mean: 0.5
//!   std: 0.25
//!   parallel: true
//! ```

mod loader;
mod schema;
mod validate;


pub use loader::{load_profile, load_spec, parse_spec};
pub use schema::{CalibrationSpec, QuantSpec, TargetProfile};
pub use validate::{validate_calibration, validate_profile, validate_spec, ValidationError};
