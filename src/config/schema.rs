//! YAML schema for target hardware and calibration settings

use serde::{Deserialize, Serialize};

/// Quantization settings for one compilation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuantSpec {
    /// Target hardware numeric profile
    #[serde(default)]
    pub target: TargetProfile,

    /// Calibration data handling
    #[serde(default)]
    pub calibration: CalibrationSpec,
}

/// Numeric limits of the target accelerator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Profile name (for diagnostics)
    #[serde(default = "default_profile_name")]
    pub name: String,

    /// Bit width of quantized activations (`1..=31`)
    #[serde(default = "default_activation_bits")]
    pub activation_bits: u32,

    /// Width of the hardware multiplier register (`1..=32`)
    #[serde(default = "default_mul_bits")]
    pub mul_bits: u32,

    /// Largest right shift the hardware can apply after multiplication
    #[serde(default = "default_max_shift")]
    pub max_shift: u8,
}

impl TargetProfile {
    /// 8-bit activations, 32-bit multiplier register
    pub fn int8() -> Self {
        Self {
            name: "int8".to_string(),
            activation_bits: 8,
            mul_bits: 32,
            max_shift: 31,
        }
    }

    /// 16-bit activations, 32-bit multiplier register
    pub fn int16() -> Self {
        Self {
            name: "int16".to_string(),
            activation_bits: 16,
            mul_bits: 32,
            max_shift: 31,
        }
    }
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self::int8()
    }
}

/// Calibration source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSpec {
    /// Samples per batch; trailing samples that do not fill a batch are dropped
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Subtracted from every sample
    #[serde(default)]
    pub mean: f32,

    /// Every sample is divided by this after mean subtraction
    #[serde(default = "default_std")]
    pub std: f32,

    /// Scan batches on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for CalibrationSpec {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            mean: 0.0,
            std: default_std(),
            parallel: false,
        }
    }
}

fn default_profile_name() -> String {
    "int8".to_string()
}

fn default_activation_bits() -> u32 {
    8
}

fn default_mul_bits() -> u32 {
    32
}

fn default_max_shift() -> u8 {
    31
}

fn default_batch_size() -> usize {
    1
}

fn default_std() -> f32 {
    1.0
}
