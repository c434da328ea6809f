//! Tensor identity and observed value ranges

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a tensor output in the graph being quantized.
///
/// The graph issues these handles; two ids compare equal only when they name
/// the same producing output. The quantizer never looks at tensor contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TensorId(u64);

impl TensorId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for TensorId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tensor#{}", self.0)
    }
}

/// Observed real-valued extent of a tensor across calibration samples
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Smallest observed value
    pub min: f32,
    /// Largest observed value
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range covering every non-NaN sample, or `None` if there is none.
    pub fn from_samples(samples: &[f32]) -> Option<Self> {
        samples
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<Self>, v| match acc {
                None => Some(Self::new(v, v)),
                Some(r) => Some(Self::new(r.min.min(v), r.max.max(v))),
            })
    }

    /// Smallest range containing both `self` and `other`.
    ///
    /// Commutative and associative, so merge order never changes the result.
    pub fn union(self, other: Self) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// `max - min`
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Widen the range so that it straddles zero.
    ///
    /// Affine quantization must represent real `0` exactly. NaN bounds are
    /// left untouched so that downstream checks still see them.
    pub fn including_zero(self) -> Self {
        let mut range = self;
        if range.max < 0.0 {
            range.max = 0.0;
        }
        if range.min > 0.0 {
            range.min = 0.0;
        }
        range
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
