//! Serializable snapshot of calibrated ranges

use serde::{Deserialize, Serialize};

use crate::error::{QuantError, Result};
use crate::range::{TensorId, ValueRange};

/// One calibrated tensor output
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub id: TensorId,
    #[serde(flatten)]
    pub range: ValueRange,
}

/// Calibrated ranges ordered by tensor id
///
/// Produced once calibration finishes and handed to code generation, or
/// reloaded to skip a calibration pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTable {
    pub entries: Vec<TableEntry>,
}

impl CalibrationTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| QuantError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QuantError::Serialization(e.to_string()))
    }
}
