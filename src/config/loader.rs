//! Loading quantization settings from YAML

use std::fs;
use std::path::Path;

use tracing::debug;

use super::schema::{QuantSpec, TargetProfile};
use super::validate::{validate_profile, validate_spec};
use crate::error::{QuantError, Result};

/// Load and validate a quantization spec from a YAML file
///
/// # Example
///
/// ```no_run
/// use quantcal::config::load_spec;
///
/// let spec = load_spec("quant.yaml")?;
/// println!("target: {}", spec.target.name);
/// # Ok::<(), quantcal::QuantError>(())
/// ```
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<QuantSpec> {
    let yaml = read_config(path.as_ref())?;
    let spec = parse_spec(&yaml)?;
    debug!(
        path = %path.as_ref().display(),
        target = %spec.target.name,
        batch_size = spec.calibration.batch_size,
        "loaded quantization spec"
    );
    Ok(spec)
}

/// Parse and validate a quantization spec from YAML text
pub fn parse_spec(yaml: &str) -> Result<QuantSpec> {
    let spec: QuantSpec = serde_yaml::from_str(yaml)
        .map_err(|e| QuantError::Config(format!("Failed to parse YAML config: {e}")))?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// Load and validate a bare target profile from a YAML file
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<TargetProfile> {
    let yaml = read_config(path.as_ref())?;
    let profile: TargetProfile = serde_yaml::from_str(&yaml)
        .map_err(|e| QuantError::Config(format!("Failed to parse YAML profile: {e}")))?;
    validate_profile(&profile)?;
    Ok(profile)
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        QuantError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })
}
