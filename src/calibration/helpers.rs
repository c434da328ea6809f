//! One-shot calibration helpers

use crate::error::{QuantError, Result};
use crate::params::{derive, QuantParam};
use crate::range::ValueRange;

/// Derive parameters straight from one sample set.
///
/// NaN samples are ignored. Fails with [`QuantError::NoSamples`] when no
/// comparable value remains.
pub fn calibrate_min_max(samples: &[f32], bits: u32) -> Result<QuantParam> {
    let range = ValueRange::from_samples(samples)
        .ok_or(QuantError::NoSamples { count: samples.len() })?;
    derive(range, bits)
}

/// Union of several sample sets, e.g. one per calibration batch.
pub fn observed_range<'a, I>(batches: I) -> Option<ValueRange>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    batches
        .into_iter()
        .filter_map(ValueRange::from_samples)
        .reduce(ValueRange::union)
}
