//! Calibration driver
//!
//! Feeds batches from a [`CalibrationSource`] through a [`Quantizer`]:
//! - Sequential: one tracker, batches in source order
//! - Parallel: per-worker trackers on the rayon pool, merged by union
//! - Shared: workers merge into a lock-guarded store as they finish
//!
//! All three produce the same ranges for the same source.
//!
//! [`Quantizer`]: crate::quantizer::Quantizer

mod calibrator;
mod helpers;
mod shared;
mod source;

#[cfg(test)]
mod tests;

pub use calibrator::{calibrate, calibrate_par, run_calibration, CalibrationReport};
pub use helpers::{calibrate_min_max, observed_range};
pub use shared::SharedQuantizer;
pub use source::{CalibrationBatch, CalibrationSource, InMemorySource};
