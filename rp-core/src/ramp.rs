//! Host-side ramp representation
//!
//! A [`Ramp`] is what a ramp parameter holds: typed interpolation bases rather
//! than the plain strings a preset file stores. Conversion to and from
//! [`RampDefinition`] is where basis names and value shapes are checked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::data::{validate_definition, RampDefinition, RampKind, RampValue};
use crate::error::{RampageError, Result};

/// Interpolation used between a ramp key and the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampBasis {
    Constant,
    Linear,
    CatmullRom,
    MonotoneCubic,
    Bezier,
    BSpline,
    Hermite,
}

/// Persisted name of every basis
const BASIS_NAMES: &[(RampBasis, &str)] = &[
    (RampBasis::Constant, "Constant"),
    (RampBasis::Linear, "Linear"),
    (RampBasis::CatmullRom, "CatmullRom"),
    (RampBasis::MonotoneCubic, "MonotoneCubic"),
    (RampBasis::Bezier, "Bezier"),
    (RampBasis::BSpline, "BSpline"),
    (RampBasis::Hermite, "Hermite"),
];

impl RampBasis {
    pub fn name(&self) -> &'static str {
        match self {
            RampBasis::Constant => "Constant",
            RampBasis::Linear => "Linear",
            RampBasis::CatmullRom => "CatmullRom",
            RampBasis::MonotoneCubic => "MonotoneCubic",
            RampBasis::Bezier => "Bezier",
            RampBasis::BSpline => "BSpline",
            RampBasis::Hermite => "Hermite",
        }
    }

    /// Look a basis up by its persisted name
    pub fn from_name(name: &str) -> Option<Self> {
        BASIS_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(basis, _)| *basis)
    }

    pub fn all() -> impl Iterator<Item = RampBasis> {
        BASIS_NAMES.iter().map(|(basis, _)| *basis)
    }
}

impl fmt::Display for RampBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RampBasis {
    type Err = RampageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| RampageError::UnknownBasis(s.to_string()))
    }
}

/// A ramp as held by a ramp parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub ramp_type: RampKind,
    pub basis: Vec<RampBasis>,
    pub keys: Vec<f64>,
    pub values: Vec<RampValue>,
}

impl Ramp {
    /// Build a ramp, checking lengths and value shapes
    pub fn new(
        ramp_type: RampKind,
        basis: Vec<RampBasis>,
        keys: Vec<f64>,
        values: Vec<RampValue>,
    ) -> Result<Self> {
        let ramp = Self {
            ramp_type,
            basis,
            keys,
            values,
        };
        ramp.validate()?;
        Ok(ramp)
    }

    pub fn is_color(&self) -> bool {
        self.ramp_type == RampKind::Color
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        validate_definition(&self.to_definition())?;
        for (i, value) in self.values.iter().enumerate() {
            check_value_shape(self.ramp_type, i, value)?;
        }
        Ok(())
    }

    pub fn to_definition(&self) -> RampDefinition {
        RampDefinition {
            ramp_type: self.ramp_type,
            keys: self.keys.clone(),
            values: self.values.clone(),
            basis: self.basis.iter().map(|b| b.name().to_string()).collect(),
        }
    }

    pub fn from_definition(definition: &RampDefinition) -> Result<Self> {
        let basis = definition
            .basis
            .iter()
            .map(|name| name.parse::<RampBasis>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            definition.ramp_type,
            basis,
            definition.keys.clone(),
            definition.values.clone(),
        )
    }
}

fn check_value_shape(kind: RampKind, index: usize, value: &RampValue) -> Result<()> {
    match (kind, value) {
        (RampKind::Float, RampValue::Scalar(_)) => Ok(()),
        (RampKind::Float, RampValue::Tuple(_)) => Err(RampageError::invalid_ramp(format!(
            "value #{} of a float ramp must be a scalar",
            index + 1
        ))),
        (RampKind::Color, RampValue::Tuple(channels))
            if limits::COLOR_CHANNELS.contains(&channels.len()) =>
        {
            Ok(())
        }
        (RampKind::Color, _) => Err(RampageError::invalid_ramp(format!(
            "value #{} of a color ramp must have 3 or 4 channels",
            index + 1
        ))),
    }
}
