//! Ordered preset collection
//!
//! A [`PresetMap`] is the in-memory form of one store file. Entries keep the
//! order they were inserted in, which is the order menus display them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::types::{Preset, RampDefinition};
use crate::data::validation::validate_preset_name;
use crate::error::{RampageError, Result};

/// Insertion-ordered mapping from preset key to preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetMap {
    entries: IndexMap<String, Preset>,
}

impl PresetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Preset> {
        self.entries.get_mut(key)
    }

    /// Insert or overwrite. An overwritten entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, preset: Preset) -> Option<Preset> {
        self.entries.insert(key.into(), preset)
    }

    /// Remove an entry, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<Preset> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Preset> {
        self.entries.iter()
    }

    /// Display names in store order
    pub fn names(&self) -> Vec<String> {
        self.entries.values().map(|p| p.name.clone()).collect()
    }

    /// Key of the n-th entry, used to resolve a list selection
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(k, _)| k.as_str())
    }

    /// Flattened `[key, label, key, label, ...]` list for a host menu
    pub fn menu_strip(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(k, p)| [k.clone(), p.name.clone()])
            .collect()
    }

    /// Overwrite the definition of a preset, keeping its name
    pub fn replace_definition(&mut self, key: &str, definition: RampDefinition) -> Result<()> {
        let preset = self
            .get_mut(key)
            .ok_or_else(|| RampageError::PresetNotFound(key.to_string()))?;
        preset.definition = definition;
        Ok(())
    }

    /// Move the preset at `old_key` to the key derived from `new_name`.
    ///
    /// Returns `Ok(None)` when `old_key` is not present. The renamed entry is
    /// re-appended at the end. Renaming onto the key of another preset fails
    /// with `DuplicateName`; renaming onto its own key only changes the label.
    pub fn renamed(mut self, old_key: &str, new_name: &str) -> Result<Option<PresetMap>> {
        if !self.contains_key(old_key) {
            return Ok(None);
        }
        let new_key = validate_preset_name(new_name)?;
        if new_key != old_key && self.contains_key(&new_key) {
            return Err(RampageError::duplicate_name(new_name, new_key));
        }

        let Some(mut preset) = self.remove(old_key) else {
            return Ok(None);
        };
        preset.name = new_name.to_string();
        self.entries.insert(new_key, preset);
        Ok(Some(self))
    }
}

impl<'a> IntoIterator for &'a PresetMap {
    type Item = (&'a String, &'a Preset);
    type IntoIter = indexmap::map::Iter<'a, String, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
