//! Per-tensor range accumulation

use std::collections::hash_map::{Entry, Iter};
use std::collections::HashMap;

use tracing::trace;

use super::types::{TensorId, ValueRange};
use crate::error::{QuantError, Result};

/// Accumulates min/max statistics per tensor output across calibration batches
#[derive(Clone, Debug, Default)]
pub struct RangeTracker {
    ranges: HashMap<TensorId, ValueRange>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a range for `id`, unioning with any range already stored.
    pub fn record_range(&mut self, id: TensorId, range: ValueRange) {
        match self.ranges.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(range);
            }
            Entry::Occupied(mut slot) => {
                let merged = slot.get().union(range);
                slot.insert(merged);
            }
        }
        trace!(tensor = %id, min = range.min, max = range.max, "recorded range");
    }

    /// Record the min/max of a batch of samples for `id`.
    ///
    /// NaN samples are skipped; a batch with nothing else is empty.
    pub fn record_samples(&mut self, id: TensorId, samples: &[f32]) -> Result<()> {
        let range = ValueRange::from_samples(samples).ok_or(QuantError::EmptySampleSet { id })?;
        self.record_range(id, range);
        Ok(())
    }

    pub fn get_range(&self, id: TensorId) -> Result<ValueRange> {
        self.ranges.get(&id).copied().ok_or(QuantError::UnknownTensor(id))
    }

    /// Union every range from `other` into this tracker.
    pub fn merge(&mut self, other: RangeTracker) {
        for (id, range) in other.ranges {
            self.record_range(id, range);
        }
    }

    pub fn contains(&self, id: TensorId) -> bool {
        self.ranges.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, TensorId, ValueRange> {
        self.ranges.iter()
    }

    /// Drop every recorded range.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

impl FromIterator<(TensorId, ValueRange)> for RangeTracker {
    fn from_iter<I: IntoIterator<Item = (TensorId, ValueRange)>>(iter: I) -> Self {
        let mut tracker = Self::new();
        for (id, range) in iter {
            tracker.record_range(id, range);
        }
        tracker
    }
}
