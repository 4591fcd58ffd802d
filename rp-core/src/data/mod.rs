//! Data types, key derivation and validation
//!
//! Contains the persisted preset model and the ordered map a store file holds.

mod key;
mod presets;
mod types;
mod validation;

pub use key::{normalize, same_key};
pub use presets::PresetMap;
pub use types::{Preset, RampDefinition, RampKind, RampValue};
pub use validation::{validate_definition, validate_file_size, validate_preset_name};
