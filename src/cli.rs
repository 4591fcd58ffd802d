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

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use rp_core::constants::paths::PRESETS_ENV;
use rp_core::{PresetStore, RampKind, Result};

#[derive(Parser, Debug)]
#[command(name = "rampage", version, about = "Save, list and apply named ramp presets")]
pub struct Cli {
    /// Directory holding float.json and color.json
    #[arg(long, global = true, env = PRESETS_ENV)]
    pub presets_dir: Option<PathBuf>,

    /// Append JSON events to <presets dir>/rampage_log.json
    #[arg(long, global = true)]
    pub logging: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List stored presets
    List {
        /// Only list one kind (float or color)
        #[arg(long)]
        kind: Option<RampKind>,
    },
    /// Print a stored preset as JSON
    Show {
        #[arg(long)]
        kind: RampKind,
        key: String,
    },
    /// Save the ramp in a file as a new preset
    Add {
        /// Ramp file to read
        #[arg(long)]
        from: PathBuf,
        /// Preset name (asked for if omitted)
        name: Option<String>,
    },
    /// Overwrite a preset with the ramp in a file
    Replace {
        #[arg(long)]
        from: PathBuf,
        /// Preset to replace, by name or key (asked for if omitted)
        name: Option<String>,
    },
    /// Delete a preset
    Remove {
        #[arg(long)]
        kind: RampKind,
        name: Option<String>,
    },
    /// Rename a preset
    Rename {
        #[arg(long)]
        kind: RampKind,
        name: Option<String>,
        new_name: Option<String>,
    },
    /// Write a preset into a ramp file
    Apply {
        /// Ramp file to write
        #[arg(long)]
        to: PathBuf,
        /// Kind of ramp, needed when the file does not exist yet
        #[arg(long)]
        kind: Option<RampKind>,
        key: String,
    },
}

impl Cli {
    /// Open the preset store named by `--presets-dir` or the environment
    pub fn open_store(&self) -> Result<PresetStore> {
        match &self.presets_dir {
            Some(dir) => Ok(PresetStore::new(dir)),
            None => PresetStore::from_env(),
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
