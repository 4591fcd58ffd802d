//! Preset store
//!
//! One JSON file per ramp kind (`float.json`, `color.json`) inside the presets
//! directory. Reads go through a per-handle cache keyed by file path; every
//! write path replaces the file atomically and then drops the cache entry.
//!
//! The cache only knows about writes made through this handle. Another process
//! rewriting a store file is not noticed until [`PresetStore::invalidate`] is
//! called, and concurrent writers are not coordinated: the last rename wins.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::constants::{limits, paths, save};
use crate::data::{
    validate_definition, validate_file_size, validate_preset_name, Preset, PresetMap,
    RampDefinition, RampKind,
};
use crate::error::{RampageError, Result};

/// Handle on a presets directory and its read cache
#[derive(Debug)]
pub struct PresetStore {
    dir: PathBuf,
    cache: RwLock<HashMap<PathBuf, PresetMap>>,
}

impl PresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Open the store named by `RAMPAGE_PRESETS_PATH`
    pub fn from_env() -> Result<Self> {
        match env::var(paths::PRESETS_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Ok(Self::new(dir)),
            _ => Err(RampageError::MissingConfig(format!(
                "{} must point to the presets directory",
                paths::PRESETS_ENV
            ))),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the store file for a ramp kind
    pub fn path_for(&self, kind: RampKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Load all presets of a kind, creating an empty store file if needed
    pub fn load(&self, kind: RampKind) -> Result<PresetMap> {
        let path = self.path_for(kind);

        if let Some(presets) = self.cache.read().get(&path) {
            debug!(path = ?path, "Preset cache hit");
            return Ok(presets.clone());
        }

        let presets = read_store_file(&path)?;
        self.cache.write().insert(path, presets.clone());
        Ok(presets)
    }

    /// Look up a single preset
    pub fn get(&self, kind: RampKind, key: &str) -> Result<Option<Preset>> {
        Ok(self.load(kind)?.get(key).cloned())
    }

    /// Add a new preset and return its key.
    ///
    /// Fails with `DuplicateName` when another preset already uses the key
    /// derived from `name`; the store file is left untouched in that case.
    pub fn add(&self, kind: RampKind, name: &str, definition: RampDefinition) -> Result<String> {
        let key = validate_preset_name(name)?;
        check_definition(kind, &definition)?;

        let mut presets = self.load(kind)?;
        if presets.contains_key(&key) {
            warn!(kind = %kind, key = %key, "Refusing to add preset with duplicate name");
            return Err(RampageError::duplicate_name(name, key));
        }

        presets.insert(key.clone(), Preset::new(name, definition));
        self.safe_save(kind, &presets)?;
        info!(kind = %kind, key = %key, "Added preset '{}'", name);
        Ok(key)
    }

    /// Overwrite the ramp stored under `key`, keeping the preset's name
    pub fn replace(&self, kind: RampKind, key: &str, definition: RampDefinition) -> Result<()> {
        check_definition(kind, &definition)?;

        let mut presets = self.load(kind)?;
        presets.replace_definition(key, definition)?;
        self.safe_save(kind, &presets)?;
        info!(kind = %kind, key = %key, "Replaced preset");
        Ok(())
    }

    /// Remove a preset. Returns false, without touching the file, if it was absent.
    pub fn remove(&self, kind: RampKind, key: &str) -> Result<bool> {
        let mut presets = self.load(kind)?;
        if presets.remove(key).is_none() {
            debug!(kind = %kind, key = %key, "Nothing to remove");
            return Ok(false);
        }

        self.safe_save(kind, &presets)?;
        info!(kind = %kind, key = %key, "Removed preset");
        Ok(true)
    }

    /// Rename the preset at `old_key` and persist the result.
    ///
    /// Returns the updated presets, or `None` if `old_key` does not exist.
    pub fn rename(&self, kind: RampKind, old_key: &str, new_name: &str) -> Result<Option<PresetMap>> {
        let presets = self.load(kind)?;
        let Some(renamed) = presets.renamed(old_key, new_name)? else {
            debug!(kind = %kind, key = %old_key, "Nothing to rename");
            return Ok(None);
        };

        self.safe_save(kind, &renamed)?;
        info!(kind = %kind, from = %old_key, "Renamed preset to '{}'", new_name);
        Ok(Some(renamed))
    }

    /// Atomically replace the store file for `kind` with `presets`.
    ///
    /// The data is written and synced to a uniquely named sibling file which is
    /// then renamed over the target, so readers see either the old or the new
    /// file and never a partial one.
    pub fn safe_save(&self, kind: RampKind, presets: &PresetMap) -> Result<()> {
        let path = self.path_for(kind);
        let staged = write_temp(&path, presets)?;

        staged.persist(&path).map_err(|e| RampageError::FileWrite {
            path: path.clone(),
            source: e.error,
        })?;

        // Best-effort set permissions to 0644
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o644));
        }

        self.invalidate(kind);
        debug!(path = ?path, presets = presets.len(), "Saved preset store");
        Ok(())
    }

    /// Drop the cached copy of one store file
    pub fn invalidate(&self, kind: RampKind) {
        self.cache.write().remove(&self.path_for(kind));
    }

    /// Drop every cached store file
    pub fn invalidate_all(&self) {
        self.cache.write().clear();
    }

    #[cfg(test)]
    fn is_cached(&self, kind: RampKind) -> bool {
        self.cache.read().contains_key(&self.path_for(kind))
    }
}

fn check_definition(kind: RampKind, definition: &RampDefinition) -> Result<()> {
    if definition.ramp_type != kind {
        return Err(RampageError::invalid_ramp(format!(
            "cannot store a {} ramp in the {} presets",
            definition.ramp_type, kind
        )));
    }
    validate_definition(definition)
}

fn read_store_file(path: &Path) -> Result<PresetMap> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RampageError::FileWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, paths::EMPTY_STORE).map_err(|e| RampageError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(path = ?path, "Created empty preset store");
        return Ok(PresetMap::new());
    }

    validate_file_size(path, limits::MAX_STORE_SIZE)?;

    let contents = fs::read_to_string(path).map_err(|e| RampageError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let presets: PresetMap = serde_json::from_str(&contents)?;

    debug!(path = ?path, presets = presets.len(), "Loaded preset store");
    Ok(presets)
}

fn to_json(presets: &PresetMap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(save::INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    presets.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write `presets` to `<path>.<random>` next to `path` and sync it.
///
/// Dropping the returned file without persisting it removes it again.
fn write_temp(path: &Path, presets: &PresetMap) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .ok_or_else(|| RampageError::generic(format!("{:?} has no parent directory", path)))?;
    fs::create_dir_all(dir).map_err(|e| RampageError::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = format!("{}.", file_name);

    let write_err = |e: std::io::Error| RampageError::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .rand_bytes(save::TEMP_SUFFIX_LEN)
        .tempfile_in(dir)
        .map_err(write_err)?;

    let json = to_json(presets)?;
    temp.write_all(&json).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    Ok(temp)
}
