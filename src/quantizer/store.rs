//! Keyed quantizer store used by graph passes

use tracing::debug;

use super::table::{CalibrationTable, TableEntry};
use crate::config::TargetProfile;
use crate::error::Result;
use crate::fixed_mul::{encode_fixed_mul, FixedMul};
use crate::params::{derive, QuantParam};
use crate::range::{RangeTracker, TensorId, ValueRange};

/// Single entry point for calibration and parameter derivation
///
/// Owns the range of every recorded tensor output for one compilation run.
/// Populated during calibration, read-only afterwards.
///
/// # Example
///
/// ```
/// use quantcal::{Quantizer, TensorId, ValueRange};
///
/// let mut quantizer = Quantizer::new();
/// let conv_out = TensorId::new(0);
///
/// quantizer.record_range(conv_out, ValueRange::new(-1.0, 3.0));
/// quantizer.record_samples(conv_out, &[-2.0, 0.5, 1.0])?;
///
/// let param = quantizer.get_quant_param(conv_out, 8)?;
/// assert_eq!(param.bias, 102);
///
/// let mul = quantizer.get_fixed_mul(0.5, 8, 8, false)?;
/// assert_eq!(mul.reconstruct(), 0.5);
/// # Ok::<(), quantcal::QuantError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Quantizer {
    ranges: RangeTracker,
}

impl Quantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed range, merging with any previous observation.
    pub fn record_range(&mut self, id: TensorId, range: ValueRange) {
        self.ranges.record_range(id, range);
    }

    /// Record the extent of a batch of samples.
    pub fn record_samples(&mut self, id: TensorId, samples: &[f32]) -> Result<()> {
        self.ranges.record_samples(id, samples)
    }

    /// Merged range of `id`.
    pub fn get_range(&self, id: TensorId) -> Result<ValueRange> {
        self.ranges.get_range(id)
    }

    /// Alias of [`Quantizer::get_range`].
    pub fn get(&self, id: TensorId) -> Result<ValueRange> {
        self.get_range(id)
    }

    /// Quantization parameters for the tracked range of `id`.
    pub fn get_quant_param(&self, id: TensorId, bits: u32) -> Result<QuantParam> {
        let range = self.ranges.get_range(id)?;
        self.quant_param_for(range, bits)
    }

    /// Quantization parameters for an explicit range, ignoring the store.
    pub fn quant_param_for(&self, range: ValueRange, bits: u32) -> Result<QuantParam> {
        derive(range, bits)
    }

    /// Fixed-point encoding of a scalar multiplier. Does not touch the store.
    pub fn get_fixed_mul(
        &self,
        value: f32,
        max_bits: u32,
        max_shift: u8,
        is_signed: bool,
    ) -> Result<FixedMul> {
        encode_fixed_mul(value, max_bits, max_shift, is_signed)
    }

    /// Quantization parameters for `id` at the profile's activation width.
    pub fn quant_param_with(&self, id: TensorId, profile: &TargetProfile) -> Result<QuantParam> {
        self.get_quant_param(id, profile.activation_bits)
    }

    /// Fixed-point encoding within the profile's multiplier and shift budget.
    pub fn fixed_mul_with(
        &self,
        profile: &TargetProfile,
        value: f32,
        is_signed: bool,
    ) -> Result<FixedMul> {
        encode_fixed_mul(value, profile.mul_bits, profile.max_shift, is_signed)
    }

    /// Union every range of `other` into this store.
    pub fn merge(&mut self, other: Quantizer) {
        self.ranges.merge(other.ranges);
    }

    /// Union a bare tracker into this store.
    pub fn merge_tracker(&mut self, tracker: RangeTracker) {
        self.ranges.merge(tracker);
    }

    pub fn ranges(&self) -> &RangeTracker {
        &self.ranges
    }

    pub fn contains(&self, id: TensorId) -> bool {
        self.ranges.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Snapshot of every recorded range, ordered by tensor id.
    pub fn export_table(&self) -> CalibrationTable {
        let mut entries: Vec<TableEntry> =
            self.ranges.iter().map(|(&id, &range)| TableEntry { id, range }).collect();
        entries.sort_by_key(|e| e.id);
        debug!(tensors = entries.len(), "exported calibration table");
        CalibrationTable { entries }
    }

    /// Rebuild a store from a snapshot. Duplicate ids are unioned.
    pub fn from_table(table: &CalibrationTable) -> Self {
        let ranges = table.entries.iter().map(|e| (e.id, e.range)).collect();
        Self { ranges }
    }
}

impl From<RangeTracker> for Quantizer {
    fn from(ranges: RangeTracker) -> Self {
        Self { ranges }
    }
}
