//! Input validation for presets
//!
//! The store only checks what it needs to keep its files loadable: preset names
//! must produce a usable key, and a definition's parallel sequences must line up.
//! Domain checks on basis names and color channels live in [`crate::ramp`].

use std::fs;
use std::path::Path;

use crate::constants::limits;
use crate::data::key::normalize;
use crate::data::types::RampDefinition;
use crate::error::{RampageError, Result};

/// Validates a preset display name and returns its store key
pub fn validate_preset_name(name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(RampageError::invalid_name(name, "name is empty"));
    }
    if name.chars().count() > limits::MAX_NAME_LENGTH {
        return Err(RampageError::invalid_name(
            name,
            format!("name longer than {} characters", limits::MAX_NAME_LENGTH),
        ));
    }

    let key = normalize(name);
    if key.is_empty() {
        return Err(RampageError::invalid_name(
            name,
            "name must contain at least one ASCII letter or digit",
        ));
    }
    Ok(key)
}

/// Validates the length invariant `len(basis) == len(keys) == len(values)`
pub fn validate_definition(definition: &RampDefinition) -> Result<()> {
    let (b, k, v) = (
        definition.basis.len(),
        definition.keys.len(),
        definition.values.len(),
    );
    if b != k || k != v {
        return Err(RampageError::invalid_ramp(format!(
            "basis, keys and values must have the same length (got {}, {}, {})",
            b, k, v
        )));
    }

    // JSON has no representation for NaN or infinity
    if definition.keys.iter().any(|k| !k.is_finite()) {
        return Err(RampageError::invalid_ramp("ramp keys must be finite"));
    }
    if definition
        .values
        .iter()
        .any(|v| v.components().iter().any(|c| !c.is_finite()))
    {
        return Err(RampageError::invalid_ramp("ramp values must be finite"));
    }
    Ok(())
}

/// Validates that a file is not larger than the maximum allowed size
pub fn validate_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| RampageError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let size = metadata.len();
    if size > max_size {
        return Err(RampageError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }
    Ok(())
}
