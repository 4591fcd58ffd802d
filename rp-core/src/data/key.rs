//! Preset key derivation
//!
//! A preset's store key is its display name lower-cased with everything but
//! ASCII letters and digits removed. Two names that reduce to the same string
//! refer to the same preset.

/// Derive the store key for a preset name
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True when two names would collide in a store
pub fn same_key(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
