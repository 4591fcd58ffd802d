//! Constants for Rampage
//!
//! Centralizes file names, environment variables and limits so they are not
//! scattered through the store and the front end.

/// File system layout of the preset directory
pub mod paths {
    /// Environment variable holding the preset directory
    pub const PRESETS_ENV: &str = "RAMPAGE_PRESETS_PATH";

    /// Store file for float ramps
    pub const FLOAT_FILE: &str = "float.json";

    /// Store file for color ramps
    pub const COLOR_FILE: &str = "color.json";

    /// Contents written when a store file is first created
    pub const EMPTY_STORE: &str = "{}";

    /// JSON event log written by the front end when logging is enabled
    pub const EVENT_LOG_FILE: &str = "rampage_log.json";
}

/// Safe-save parameters
pub mod save {
    /// Number of random characters appended to a temporary store file
    pub const TEMP_SUFFIX_LEN: usize = 7;

    /// Indentation used for store files
    pub const INDENT: &[u8] = b"    ";
}

/// Input limits
pub mod limits {
    /// Maximum length of a preset display name, in characters
    pub const MAX_NAME_LENGTH: usize = 256;

    /// Maximum store file size accepted on load (10 MB)
    pub const MAX_STORE_SIZE: u64 = 10 * 1024 * 1024;

    /// Channel counts accepted for a color ramp value (RGB or RGBA)
    pub const COLOR_CHANNELS: [usize; 2] = [3, 4];
}
