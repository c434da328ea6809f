//! Quantizer shared between calibration workers

use std::sync::Arc;

use parking_lot::Mutex;
use rayon::iter::{ParallelBridge, ParallelIterator};

use super::calibrator::{observe_batch, CalibrationReport};
use super::source::CalibrationSource;
use crate::error::Result;
use crate::quantizer::Quantizer;
use crate::range::{RangeTracker, TensorId, ValueRange};

/// Quantizer behind a lock, for workers that scan independently
///
/// Workers accumulate into a private [`RangeTracker`] and take the lock only
/// to merge it in, never while scanning samples.
#[derive(Clone, Debug, Default)]
pub struct SharedQuantizer {
    inner: Arc<Mutex<Quantizer>>,
}

impl SharedQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a worker's local ranges into the shared store.
    pub fn merge_local(&self, local: RangeTracker) {
        self.inner.lock().merge_tracker(local);
    }

    pub fn get_range(&self, id: TensorId) -> Result<ValueRange> {
        self.inner.lock().get_range(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the current store.
    pub fn snapshot(&self) -> Quantizer {
        self.inner.lock().clone()
    }

    /// Scan `source` on the rayon pool, merging each worker's partial
    /// tracker under the lock as it finishes.
    pub fn calibrate<S>(&self, source: &S) -> CalibrationReport
    where
        S: CalibrationSource + ?Sized,
    {
        source
            .batches()
            .par_bridge()
            .fold(
                || (RangeTracker::new(), CalibrationReport::default()),
                |(mut tracker, mut report), batch| {
                    observe_batch(&mut tracker, &mut report, &batch);
                    (tracker, report)
                },
            )
            .map(|(tracker, report)| {
                self.merge_local(tracker);
                report
            })
            .reduce(CalibrationReport::default, CalibrationReport::combine)
    }

    /// Take the store back, cloning only if other handles are still alive.
    pub fn into_inner(self) -> Quantizer {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}

impl From<Quantizer> for SharedQuantizer {
    fn from(quantizer: Quantizer) -> Self {
        Self { inner: Arc::new(Mutex::new(quantizer)) }
    }
}
