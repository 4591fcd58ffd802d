//! Core data types for Rampage
//!
//! Defines the persisted shape of a preset. The layout of a preset record is
//! `{"name", "ramp_type", "keys", "values", "basis"}`, with the definition
//! fields flattened next to the name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::paths;
use crate::error::RampageError;

/// Kind of ramp a preset belongs to. Each kind has its own store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampKind {
    Float,
    Color,
}

impl RampKind {
    pub const ALL: [RampKind; 2] = [RampKind::Float, RampKind::Color];

    /// Lower-case name, as persisted in `ramp_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            RampKind::Float => "float",
            RampKind::Color => "color",
        }
    }

    /// Store file name inside the presets directory
    pub fn file_name(&self) -> &'static str {
        match self {
            RampKind::Float => paths::FLOAT_FILE,
            RampKind::Color => paths::COLOR_FILE,
        }
    }
}

impl fmt::Display for RampKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RampKind {
    type Err = RampageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float" => Ok(RampKind::Float),
            "color" | "colour" => Ok(RampKind::Color),
            other => Err(RampageError::generic(format!(
                "unknown ramp kind '{}' (expected 'float' or 'color')",
                other
            ))),
        }
    }
}

/// A single ramp value: a scalar for float ramps, a channel tuple for color ramps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RampValue {
    Scalar(f64),
    Tuple(Vec<f64>),
}

impl RampValue {
    pub fn is_scalar(&self) -> bool {
        matches!(self, RampValue::Scalar(_))
    }

    /// All numeric components of the value
    pub fn components(&self) -> &[f64] {
        match self {
            RampValue::Scalar(v) => std::slice::from_ref(v),
            RampValue::Tuple(v) => v,
        }
    }
}

/// Serialized ramp: parallel `basis`, `keys` and `values` sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampDefinition {
    pub ramp_type: RampKind,
    pub keys: Vec<f64>,
    pub values: Vec<RampValue>,
    pub basis: Vec<String>,
}

impl RampDefinition {
    /// Number of control points
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A named, stored ramp definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub definition: RampDefinition,
}

impl Preset {
    pub fn new(name: impl Into<String>, definition: RampDefinition) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }

    pub fn kind(&self) -> RampKind {
        self.definition.ramp_type
    }
}
