//! Calibration data sources

use tracing::debug;

use crate::config::{validate_calibration, CalibrationSpec};
use crate::error::{QuantError, Result};
use crate::range::TensorId;

/// One batch of floating-point samples observed at a tensor output
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationBatch {
    pub id: TensorId,
    pub samples: Vec<f32>,
}

/// Producer of calibration batches
///
/// `batches` may be called any number of times; each call restarts the
/// sequence from the beginning. The sequence is finite.
pub trait CalibrationSource {
    /// Iterate over every batch of the calibration set.
    fn batches(&self) -> Box<dyn Iterator<Item = CalibrationBatch> + Send + '_>;
}

/// Calibration samples held in memory, grouped into fixed-size batches
///
/// Samples that do not fill a whole batch at the end of a tensor are dropped,
/// and every sample is normalized as `(x - mean) / std` when yielded.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    tensors: Vec<(TensorId, Vec<f32>)>,
    batch_size: usize,
    mean: f32,
    std: f32,
}

impl InMemorySource {
    /// Build a source from per-tensor samples.
    ///
    /// # Errors
    /// * [`QuantError::Validation`] if `spec` is invalid
    /// * [`QuantError::InvalidSource`] if no tensor holds a full batch
    pub fn new(tensors: Vec<(TensorId, Vec<f32>)>, spec: &CalibrationSpec) -> Result<Self> {
        validate_calibration(spec)?;

        let batch_size = spec.batch_size;
        let tensors: Vec<(TensorId, Vec<f32>)> = tensors
            .into_iter()
            .map(|(id, mut samples)| {
                samples.truncate((samples.len() / batch_size) * batch_size);
                (id, samples)
            })
            .collect();

        if tensors.iter().all(|(_, samples)| samples.is_empty()) {
            return Err(QuantError::InvalidSource(format!(
                "should contain one full batch of {batch_size} samples at least"
            )));
        }

        debug!(tensors = tensors.len(), batch_size, "built in-memory calibration source");
        Ok(Self { tensors, batch_size, mean: spec.mean, std: spec.std })
    }

    /// Build a source with one sample per batch and no normalization.
    pub fn from_samples(tensors: Vec<(TensorId, Vec<f32>)>) -> Result<Self> {
        Self::new(tensors, &CalibrationSpec::default())
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Total number of batches yielded per pass.
    pub fn num_batches(&self) -> usize {
        self.tensors.iter().map(|(_, samples)| samples.len() / self.batch_size).sum()
    }

    fn normalize(&self, x: f32) -> f32 {
        (x - self.mean) / self.std
    }
}

impl CalibrationSource for InMemorySource {
    fn batches(&self) -> Box<dyn Iterator<Item = CalibrationBatch> + Send + '_> {
        Box::new(self.tensors.iter().flat_map(move |(id, samples)| {
            samples.chunks_exact(self.batch_size).map(move |chunk| CalibrationBatch {
                id: *id,
                samples: chunk.iter().map(|&x| self.normalize(x)).collect(),
            })
        }))
    }
}

impl CalibrationSource for [CalibrationBatch] {
    fn batches(&self) -> Box<dyn Iterator<Item = CalibrationBatch> + Send + '_> {
        Box::new(self.iter().cloned())
    }
}

impl CalibrationSource for Vec<CalibrationBatch> {
    fn batches(&self) -> Box<dyn Iterator<Item = CalibrationBatch> + Send + '_> {
        self.as_slice().batches()
    }
}
