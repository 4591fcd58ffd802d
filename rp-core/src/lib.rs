//! Rampage Core Library
//!
//! Named presets for float and color ramp parameters.
//!
//! # Module Structure
//!
//! - `data/` - Preset model, key derivation, validation
//! - `ramp` - Host-side ramp representation and basis table
//! - `store` - On-disk preset store with atomic saves and a read cache
//! - `menu` - Callbacks a host wires into its parameter menu
//!
//! # Example
//!
//! ```no_run
//! use rp_core::{PresetStore, RampKind};
//!
//! let store = PresetStore::from_env().unwrap();
//! for (key, preset) in &store.load(RampKind::Color).unwrap() {
//!     println!("{key}: {}", preset.name);
//! }
//! ```

// Grouped modules
pub mod data;

// Standalone modules
pub mod constants;
pub mod error;
pub mod menu;
pub mod ramp;
pub mod store;

pub use data::{
    normalize, same_key, validate_definition, validate_file_size, validate_preset_name, Preset,
    PresetMap, RampDefinition, RampKind, RampValue,
};

pub use error::{RampageError, Result};

pub use menu::{
    add_preset, apply_preset, choose_preset, menu_strip, remove_preset, rename_preset,
    rename_preset_of_kind, replace_preset, should_display_menu, Prompter, RampParameter,
};

pub use ramp::{Ramp, RampBasis};

pub use store::PresetStore;
