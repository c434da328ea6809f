//! Quantization parameter engine for fixed-point accelerators.
//!
//! Observes floating-point value distributions per tensor output during a
//! calibration pass and derives what integer code generation needs:
//! - Affine quantization parameters (`scale`, `bias`) per tensor output
//! - Fixed-point `(multiplier, shift)` encodings for real scale factors
//!
//! ```
//! use quantcal::{calibrate, CalibrationBatch, Quantizer, TensorId};
//!
//! let conv = TensorId::new(0);
//! let batches = vec![
//!     CalibrationBatch { id: conv, samples: vec![-1.0, 3.0] },
//!     CalibrationBatch { id: conv, samples: vec![-2.0, 1.0] },
//! ];
//!
//! let mut quantizer = Quantizer::new();
//! calibrate(&mut quantizer, &batches);
//!
//! let param = quantizer.get_quant_param(conv, 8)?;
//! assert_eq!(param.bias, 102);
//! # Ok::<(), quantcal::QuantError>(())
//! ```

pub mod calibration;
pub mod config;
pub mod error;
pub mod fixed_mul;
pub mod params;
pub mod quantizer;
pub mod range;

pub use calibration::{
    calibrate, calibrate_min_max, calibrate_par, run_calibration, CalibrationBatch,
    CalibrationReport, CalibrationSource, InMemorySource, SharedQuantizer,
};
pub use config::{load_profile, load_spec, CalibrationSpec, QuantSpec, TargetProfile};
pub use error::{QuantError, Result};
pub use fixed_mul::{encode_fixed_mul, FixedMul};
pub use params::{derive, QuantParam};
pub use quantizer::{CalibrationTable, Quantizer};
pub use range::{RangeTracker, TensorId, ValueRange};
