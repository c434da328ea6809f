//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = QuantSpec> {
    (
        1u32..=31,         // activation_bits
        1u32..=32,         // mul_bits
        0u8..=127,         // max_shift
        1usize..1024,      // batch_size
        -10.0f32..10.0,    // mean
        1e-3f32..100.0,    // std
        any::<bool>(),     // parallel
    )
        .prop_map(|(activation_bits, mul_bits, max_shift, batch_size, mean, std, parallel)| {
            QuantSpec {
                target: TargetProfile {
                    name: "generated".to_string(),
                    activation_bits,
                    mul_bits,
                    max_shift,
                },
                calibration: CalibrationSpec { batch_size, mean, std, parallel },
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn prop_oversized_activation_bits_fail(spec in arb_valid_spec(), bits in 32u32..1000) {
        let mut spec = spec;
        spec.target.activation_bits = bits;
        prop_assert_eq!(validate_spec(&spec), Err(ValidationError::InvalidActivationBits(bits)));
    }

    #[test]
    fn prop_oversized_shift_fails(spec in arb_valid_spec(), shift in 128u8..=255) {
        let mut spec = spec;
        spec.target.max_shift = shift;
        prop_assert_eq!(validate_spec(&spec), Err(ValidationError::InvalidMaxShift(shift)));
    }

    #[test]
    fn prop_non_positive_std_fails(spec in arb_valid_spec(), std in -100.0f32..=0.0) {
        let mut spec = spec;
        spec.calibration.std = std;
        prop_assert!(matches!(validate_spec(&spec), Err(ValidationError::InvalidStd(_))));
    }

    #[test]
    fn prop_yaml_roundtrip(spec in arb_valid_spec()) {
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let back: QuantSpec = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, spec);
    }
}
