/*
 * This file is part of Rampage.
 *
 * Copyright (C) 2025 Rampage contributors
 *
 * Rampage is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rampage is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rampage. If not, see <https://www.gnu.org/licenses/>.
 */

//! A ramp parameter backed by a JSON file.
//!
//! The command line has no scene to read ramps from, so a ramp "parameter" is
//! a file holding a serialized [`Ramp`]:
//!
//! ```json
//! {
//!   "ramp_type": "color",
//!   "basis": ["Linear", "Linear"],
//!   "keys": [0.0, 1.0],
//!   "values": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rp_core::{RampKind, RampParameter, RampageError, Ramp, Result};

#[derive(Debug, Clone)]
pub struct RampFile {
    path: PathBuf,
    kind: Option<RampKind>,
}

impl RampFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: None,
        }
    }

    /// Declare the ramp kind, so a file that does not exist yet can be written
    pub fn with_kind(mut self, kind: Option<RampKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Ramp> {
        let contents = fs::read_to_string(&self.path).map_err(|e| RampageError::FileRead {
            path: self.path.clone(),
            source: e,
        })?;
        let ramp: Ramp = serde_json::from_str(&contents)?;
        ramp.validate()?;
        Ok(ramp)
    }
}

impl RampParameter for RampFile {
    fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn is_ramp(&self) -> bool {
        self.kind.is_some() || self.read().is_ok()
    }

    fn ramp_kind(&self) -> Option<RampKind> {
        self.kind.or_else(|| self.read().ok().map(|r| r.ramp_type))
    }

    fn eval_ramp(&self) -> Result<Ramp> {
        let ramp = self.read()?;
        if let Some(kind) = self.kind {
            if ramp.ramp_type != kind {
                return Err(RampageError::invalid_ramp(format!(
                    "{} holds a {} ramp, expected {}",
                    self.path.display(),
                    ramp.ramp_type,
                    kind
                )));
            }
        }
        Ok(ramp)
    }

    fn set_ramp(&mut self, ramp: &Ramp) -> Result<()> {
        let json = serde_json::to_string_pretty(ramp)?;
        fs::write(&self.path, json).map_err(|e| RampageError::FileWrite {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}
