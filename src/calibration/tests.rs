//! Tests for the calibration driver

use super::*;
use crate::config::CalibrationSpec;
use crate::error::QuantError;
use crate::quantizer::Quantizer;
use crate::range::{TensorId, ValueRange};
use approx::assert_abs_diff_eq;
use proptest::prelude::*;

fn spec(batch_size: usize, mean: f32, std: f32) -> CalibrationSpec {
    CalibrationSpec { batch_size, mean, std, parallel: false }
}

fn batch(id: u64, samples: &[f32]) -> CalibrationBatch {
    CalibrationBatch { id: TensorId::new(id), samples: samples.to_vec() }
}

fn assert_same_ranges(a: &Quantizer, b: &Quantizer) {
    assert_eq!(a.len(), b.len());
    for (&id, &range) in a.ranges().iter() {
        assert_eq!(b.get_range(id).expect("tensor should be present"), range);
    }
}

// ========================================================================
// PROPERTY TESTS - Pass equivalence
// ========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(200))]

    /// Parallel and sequential passes record identical ranges
    #[test]
    fn prop_parallel_matches_sequential(
        batches in prop::collection::vec(
            (0u64..6, prop::collection::vec(-100.0f32..100.0, 1..32)),
            1..40,
        ),
    ) {
        let batches: Vec<CalibrationBatch> =
            batches.iter().map(|(id, samples)| batch(*id, samples)).collect();

        let mut sequential = Quantizer::new();
        let seq_report = calibrate(&mut sequential, &batches);

        let mut parallel = Quantizer::new();
        let par_report = calibrate_par(&mut parallel, &batches);

        prop_assert_eq!(seq_report, par_report);
        prop_assert_eq!(sequential.len(), parallel.len());
        for (&id, &range) in sequential.ranges().iter() {
            prop_assert_eq!(parallel.get_range(id).unwrap(), range);
        }
    }

    /// The shared store ends up with the same ranges as a sequential pass
    #[test]
    fn prop_shared_matches_sequential(
        batches in prop::collection::vec(
            (0u64..4, prop::collection::vec(-10.0f32..10.0, 1..16)),
            1..30,
        ),
    ) {
        let batches: Vec<CalibrationBatch> =
            batches.iter().map(|(id, samples)| batch(*id, samples)).collect();

        let mut sequential = Quantizer::new();
        calibrate(&mut sequential, &batches);

        let shared = SharedQuantizer::new();
        let report = shared.calibrate(&batches);
        prop_assert_eq!(report.batches, batches.len());

        let merged = shared.into_inner();
        prop_assert_eq!(merged.len(), sequential.len());
        for (&id, &range) in sequential.ranges().iter() {
            prop_assert_eq!(merged.get_range(id).unwrap(), range);
        }
    }

    /// Each tracked range covers every sample fed for that tensor
    #[test]
    fn prop_range_covers_all_samples(
        samples in prop::collection::vec(-1000.0f32..1000.0, 1..200),
        batch_size in 1usize..8,
    ) {
        prop_assume!(samples.len() >= batch_size);
        let id = TensorId::new(0);
        let source = InMemorySource::new(vec![(id, samples.clone())], &spec(batch_size, 0.0, 1.0))
            .unwrap();

        let mut quantizer = Quantizer::new();
        calibrate(&mut quantizer, &source);
        let range = quantizer.get_range(id).unwrap();

        let kept = (samples.len() / batch_size) * batch_size;
        for &x in &samples[..kept] {
            prop_assert!(range.contains(x));
        }
    }
}

// ========================================================================
// UNIT TESTS - InMemorySource
// ========================================================================

#[test]
fn test_source_truncates_to_whole_batches() {
    let id = TensorId::new(0);
    let source = InMemorySource::new(vec![(id, vec![1.0, 2.0, 3.0, 4.0, 100.0])], &spec(2, 0.0, 1.0))
        .expect("source should build");

    assert_eq!(source.batch_size(), 2);
    assert_eq!(source.num_batches(), 2);

    let batches: Vec<_> = source.batches().collect();
    assert_eq!(batches, vec![batch(0, &[1.0, 2.0]), batch(0, &[3.0, 4.0])]);
}

#[test]
fn test_source_normalizes_samples() {
    let id = TensorId::new(5);
    let source = InMemorySource::new(vec![(id, vec![1.0, 3.0, 5.0, -1.0, 9.0])], &spec(2, 1.0, 2.0))
        .expect("source should build");

    let mut quantizer = Quantizer::new();
    let report = calibrate(&mut quantizer, &source);

    assert_eq!(report.batches, 2);
    assert_eq!(report.samples, 4);
    let range = quantizer.get_range(id).unwrap();
    assert_abs_diff_eq!(range.min, -1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(range.max, 2.0, epsilon = 1e-6);
}

#[test]
fn test_source_rerun_restarts_sequence() {
    let source = InMemorySource::from_samples(vec![(TensorId::new(1), vec![0.5, -0.5])])
        .expect("source should build");
    assert_eq!(source.batches().count(), 2);
    assert_eq!(source.batches().count(), 2);
}

#[test]
fn test_source_without_full_batch_rejected() {
    let err = InMemorySource::new(
        vec![(TensorId::new(0), vec![1.0, 2.0]), (TensorId::new(1), vec![])],
        &spec(4, 0.0, 1.0),
    )
    .unwrap_err();
    assert!(matches!(err, QuantError::InvalidSource(ref msg) if msg.contains("4 samples")));
}

#[test]
fn test_source_rejects_invalid_spec() {
    let err = InMemorySource::new(vec![(TensorId::new(0), vec![1.0])], &spec(0, 0.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, QuantError::Validation(_)));

    let err = InMemorySource::new(vec![(TensorId::new(0), vec![1.0])], &spec(1, 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, QuantError::Validation(_)));
}

// ========================================================================
// UNIT TESTS - Calibration passes
// ========================================================================

#[test]
fn test_calibrate_merges_across_batches() {
    let batches = vec![
        batch(0, &[-1.0, 0.5]),
        batch(1, &[2.0, 3.0]),
        batch(0, &[4.0]),
        batch(1, &[-0.25]),
    ];

    let mut quantizer = Quantizer::new();
    let report = calibrate(&mut quantizer, &batches);

    assert_eq!(report, CalibrationReport { batches: 4, samples: 6, skipped: 0 });
    assert_eq!(quantizer.get_range(TensorId::new(0)).unwrap(), ValueRange::new(-1.0, 4.0));
    assert_eq!(quantizer.get_range(TensorId::new(1)).unwrap(), ValueRange::new(-0.25, 3.0));
}

#[test]
fn test_calibrate_skips_empty_batches() {
    let batches = vec![batch(0, &[]), batch(0, &[f32::NAN]), batch(0, &[1.0, f32::NAN, -2.0])];

    let mut quantizer = Quantizer::new();
    let report = calibrate(&mut quantizer, &batches);

    assert_eq!(report.batches, 1);
    assert_eq!(report.skipped, 2);
    assert!(report.has_skipped());
    assert_eq!(quantizer.get_range(TensorId::new(0)).unwrap(), ValueRange::new(-2.0, 1.0));
}

#[test]
fn test_calibrate_extends_existing_store() {
    let mut quantizer = Quantizer::new();
    quantizer.record_range(TensorId::new(0), ValueRange::new(-10.0, 0.0));

    calibrate_par(&mut quantizer, &vec![batch(0, &[5.0])]);

    assert_eq!(quantizer.get_range(TensorId::new(0)).unwrap(), ValueRange::new(-10.0, 5.0));
}

#[test]
fn test_run_calibration_dispatch() {
    let batches: Vec<CalibrationBatch> =
        (0..64).map(|i| batch(i % 3, &[i as f32, -(i as f32) / 2.0])).collect();

    let mut sequential = Quantizer::new();
    let seq = run_calibration(&mut sequential, &batches, &spec(1, 0.0, 1.0));

    let mut parallel = Quantizer::new();
    let par_spec = CalibrationSpec { parallel: true, ..spec(1, 0.0, 1.0) };
    let par = run_calibration(&mut parallel, &batches, &par_spec);

    assert_eq!(seq, par);
    assert_same_ranges(&sequential, &parallel);
}

#[test]
fn test_calibrate_empty_source() {
    let batches: Vec<CalibrationBatch> = Vec::new();
    let mut quantizer = Quantizer::new();

    assert_eq!(calibrate_par(&mut quantizer, &batches), CalibrationReport::default());
    assert!(quantizer.is_empty());
}

#[test]
fn test_report_combine() {
    let a = CalibrationReport { batches: 2, samples: 10, skipped: 1 };
    let b = CalibrationReport { batches: 3, samples: 7, skipped: 0 };
    assert_eq!(a.combine(b), CalibrationReport { batches: 5, samples: 17, skipped: 1 });
}

// ========================================================================
// UNIT TESTS - SharedQuantizer
// ========================================================================

#[test]
fn test_shared_quantizer_across_threads() {
    let shared = SharedQuantizer::new();

    std::thread::scope(|s| {
        for worker in 0..4u64 {
            let handle = shared.clone();
            s.spawn(move || {
                let batches: Vec<CalibrationBatch> = (0..8)
                    .map(|i| batch(i % 2, &[(worker * 10 + i) as f32, -((worker + i) as f32)]))
                    .collect();
                handle.calibrate(&batches);
            });
        }
    });

    assert_eq!(shared.len(), 2);
    // tensor 0 sees i in {0,2,4,6}, tensor 1 sees i in {1,3,5,7}
    assert_eq!(shared.get_range(TensorId::new(0)).unwrap(), ValueRange::new(-9.0, 36.0));
    assert_eq!(shared.get_range(TensorId::new(1)).unwrap(), ValueRange::new(-10.0, 37.0));

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.len(), 2);

    // another handle is still alive, so this clones
    let other = shared.clone();
    let quantizer = shared.into_inner();
    assert_same_ranges(&quantizer, &other.snapshot());
}

#[test]
fn test_shared_merge_local() {
    let shared = SharedQuantizer::from(Quantizer::new());
    assert!(shared.is_empty());

    let mut local = crate::range::RangeTracker::new();
    local.record_range(TensorId::new(9), ValueRange::new(0.0, 1.0));
    shared.merge_local(local);

    assert_eq!(shared.get_range(TensorId::new(9)).unwrap(), ValueRange::new(0.0, 1.0));
    assert!(shared.get_range(TensorId::new(1)).is_err());
}

// ========================================================================
// UNIT TESTS - Helpers
// ========================================================================

#[test]
fn test_calibrate_min_max() {
    let param = calibrate_min_max(&[-2.0, 1.0, 3.0], 8).expect("calibration should succeed");
    assert_eq!(param.bias, 102);
    assert_abs_diff_eq!(param.scale, 51.0, epsilon = 1e-4);

    let err = calibrate_min_max(&[f32::NAN, f32::NAN], 8).unwrap_err();
    assert!(matches!(err, QuantError::NoSamples { count: 2 }));

    let err = calibrate_min_max(&[], 8).unwrap_err();
    assert!(matches!(err, QuantError::NoSamples { count: 0 }));
}

#[test]
fn test_observed_range() {
    let a = [1.0f32, 2.0];
    let b = [-3.0f32];
    let empty: [f32; 0] = [];

    let range = observed_range([&a[..], &empty[..], &b[..]]).expect("range should exist");
    assert_eq!(range, ValueRange::new(-3.0, 2.0));
    assert!(observed_range([&empty[..]]).is_none());
}
