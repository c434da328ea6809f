//! Calibration passes over a source
//!
//! The sequential and parallel passes produce identical stores: every batch
//! is reduced to a range and ranges are combined by union.

use rayon::iter::{ParallelBridge, ParallelIterator};
use tracing::{debug, warn};

use super::source::{CalibrationBatch, CalibrationSource};
use crate::config::CalibrationSpec;
use crate::quantizer::Quantizer;
use crate::range::RangeTracker;

/// Summary of one calibration pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalibrationReport {
    /// Batches folded into the store
    pub batches: usize,
    /// Samples scanned across those batches
    pub samples: usize,
    /// Batches skipped because they held no comparable value
    pub skipped: usize,
}

impl CalibrationReport {
    /// Sum two partial reports.
    pub fn combine(self, other: Self) -> Self {
        Self {
            batches: self.batches + other.batches,
            samples: self.samples + other.samples,
            skipped: self.skipped + other.skipped,
        }
    }

    /// Whether any batch was skipped.
    pub fn has_skipped(&self) -> bool {
        self.skipped > 0
    }
}

/// Scan one batch into a local tracker.
pub(crate) fn observe_batch(
    tracker: &mut RangeTracker,
    report: &mut CalibrationReport,
    batch: &CalibrationBatch,
) {
    match tracker.record_samples(batch.id, &batch.samples) {
        Ok(()) => {
            report.batches += 1;
            report.samples += batch.samples.len();
        }
        Err(e) => {
            warn!(tensor = %batch.id, error = %e, "skipping calibration batch");
            report.skipped += 1;
        }
    }
}

/// Fold every batch of `source` into a fresh tracker on the rayon pool.
pub(crate) fn scan_par<S>(source: &S) -> (RangeTracker, CalibrationReport)
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
        .reduce(
            || (RangeTracker::new(), CalibrationReport::default()),
            |(mut left, left_report), (right, right_report)| {
                left.merge(right);
                (left, left_report.combine(right_report))
            },
        )
}

/// Run a sequential calibration pass, recording into `quantizer`.
///
/// Empty batches are skipped and counted in the report.
pub fn calibrate<S>(quantizer: &mut Quantizer, source: &S) -> CalibrationReport
where
    S: CalibrationSource + ?Sized,
{
    let mut tracker = RangeTracker::new();
    let mut report = CalibrationReport::default();

    for batch in source.batches() {
        observe_batch(&mut tracker, &mut report, &batch);
    }

    quantizer.merge_tracker(tracker);
    debug!(
        batches = report.batches,
        samples = report.samples,
        skipped = report.skipped,
        tensors = quantizer.len(),
        "calibration pass complete"
    );
    report
}

/// Run a parallel calibration pass, recording into `quantizer`.
///
/// Each rayon worker accumulates into its own tracker; partial trackers are
/// merged by union and folded into `quantizer` once at the end.
pub fn calibrate_par<S>(quantizer: &mut Quantizer, source: &S) -> CalibrationReport
where
    S: CalibrationSource + ?Sized,
{
    let (tracker, report) = scan_par(source);
    quantizer.merge_tracker(tracker);
    debug!(
        batches = report.batches,
        samples = report.samples,
        skipped = report.skipped,
        tensors = quantizer.len(),
        "parallel calibration pass complete"
    );
    report
}

/// Run the pass selected by `spec.parallel`.
pub fn run_calibration<S>(
    quantizer: &mut Quantizer,
    source: &S,
    spec: &CalibrationSpec,
) -> CalibrationReport
where
    S: CalibrationSource + ?Sized,
{
    if spec.parallel {
        calibrate_par(quantizer, source)
    } else {
        calibrate(quantizer, source)
    }
}
